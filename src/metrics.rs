//! Extraction metrics
//!
//! Counters and histograms recorded through the `metrics` facade. Nothing is
//! exported unless the embedding process installs a recorder.

use crate::types::{Provenance, Tier};

macro_rules! extraction_metric {
    (counter, $name:literal) => {
        concat!("insured_extraction_", $name, "_total")
    };
    (histogram, $name:literal) => {
        concat!("insured_extraction_", $name)
    };
}

/// Metric name and help text, for registries that want to describe them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDoc {
    pub name: &'static str,
    pub help: &'static str,
}

/// Metrics for the extraction cascade
pub struct ExtractionMetrics;

impl ExtractionMetrics {
    /// Record one finished extraction call
    pub fn record_extraction(input_bytes: usize, provenance: &Provenance) {
        let tier = match provenance {
            Provenance::Rule { tier, .. } => tier.as_str(),
            _ => "none",
        };
        ::metrics::counter!(
            extraction_metric!(counter, "outcomes"),
            "outcome" => provenance.outcome(),
            "tier" => tier
        )
        .increment(1);
        ::metrics::histogram!(extraction_metric!(histogram, "input_bytes")).record(input_bytes as f64);

        if let Provenance::Ranked { candidates, .. } = provenance {
            ::metrics::histogram!(extraction_metric!(histogram, "ranked_candidates"))
                .record(candidates.len() as f64);
        }
        if matches!(provenance, Provenance::Degenerate) {
            ::metrics::counter!(extraction_metric!(counter, "degenerate")).increment(1);
        }
    }

    /// Record a request the service adapter refused before extraction
    pub fn record_rejected(reason: &'static str) {
        ::metrics::counter!(extraction_metric!(counter, "rejected"), "reason" => reason).increment(1);
    }

    pub fn metrics_documentation() -> Vec<MetricDoc> {
        vec![
            MetricDoc {
                name: extraction_metric!(counter, "outcomes"),
                help: "Extraction calls by outcome (rule, ranked, no_match, degenerate) and tier",
            },
            MetricDoc {
                name: extraction_metric!(counter, "degenerate"),
                help: "Documents short-circuited as PDF metadata",
            },
            MetricDoc {
                name: extraction_metric!(counter, "rejected"),
                help: "Service requests rejected by input validation",
            },
            MetricDoc {
                name: extraction_metric!(histogram, "input_bytes"),
                help: "Raw document size in bytes",
            },
            MetricDoc {
                name: extraction_metric!(histogram, "ranked_candidates"),
                help: "Candidates considered when falling back to ranking",
            },
        ]
    }

    /// Every tier label value the outcome counter can carry.
    pub fn tier_labels() -> Vec<&'static str> {
        let mut labels: Vec<&'static str> = Tier::ALL.iter().map(|tier| tier.as_str()).collect();
        labels.push("none");
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names_are_prefixed() {
        assert_eq!(extraction_metric!(counter, "outcomes"), "insured_extraction_outcomes_total");
        for doc in ExtractionMetrics::metrics_documentation() {
            assert!(doc.name.starts_with("insured_extraction_"));
        }
    }

    #[test]
    fn test_recording_without_recorder_is_a_no_op() {
        ExtractionMetrics::record_extraction(12, &Provenance::NoMatch);
        ExtractionMetrics::record_rejected("empty");
    }

    #[test]
    fn test_tier_labels_cover_all_tiers() {
        assert_eq!(ExtractionMetrics::tier_labels().len(), 5);
    }
}
