//! The extraction cascade: normalize, try each tier, fall back to ranking.

pub mod entity;
pub mod matcher;
pub mod normalizer;
pub mod ranker;
pub mod rules;

use tracing::info;

use crate::error::Result;
use crate::metrics::ExtractionMetrics;
use crate::types::{Extraction, ExtractionResult, Provenance};

use self::matcher::TieredMatcher;
use self::normalizer::normalize_document;
use self::ranker::rank_candidates;
use self::rules::{rules, RuleSet};

/// Stateless extractor over a compiled rule set. Cheap to copy and safe to
/// share between threads.
#[derive(Debug, Clone, Copy)]
pub struct Extractor {
    rules: &'static RuleSet,
}

impl Extractor {
    /// Extractor over the process-wide rule tables.
    pub fn new() -> Result<Self> {
        Ok(Self { rules: rules()? })
    }

    pub fn with_rules(rules: &'static RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static RuleSet {
        self.rules
    }

    pub fn extract(&self, document: &str) -> ExtractionResult {
        self.extract_detailed(document).result
    }

    /// Run the cascade and report which stage produced the result.
    pub fn extract_detailed(&self, document: &str) -> Extraction {
        let extraction = match normalize_document(document) {
            Err(result) => Extraction {
                result,
                provenance: Provenance::Degenerate,
            },
            Ok(text) => {
                let text = text.as_str();
                TieredMatcher::new(self.rules)
                    .find(text)
                    .map(|m| Extraction {
                        result: ExtractionResult::Found(m.name),
                        provenance: Provenance::Rule {
                            tier: m.tier,
                            rule: m.rule,
                        },
                    })
                    .unwrap_or_else(|| self.rank(text))
            }
        };

        ExtractionMetrics::record_extraction(document.len(), &extraction.provenance);
        info!(
            outcome = extraction.provenance.outcome(),
            "Extracted insured entity: '{}'", extraction.result
        );
        extraction
    }

    fn rank(&self, text: &str) -> Extraction {
        let candidates = rank_candidates(&self.rules.candidate_run, text);
        match candidates.first().cloned() {
            Some(best) => {
                info!("No clear entity found, using best candidate: '{}'", best.name);
                Extraction {
                    result: ExtractionResult::Found(best.name),
                    provenance: Provenance::Ranked {
                        score: best.score,
                        candidates,
                    },
                }
            }
            None => Extraction {
                result: ExtractionResult::Unknown,
                provenance: Provenance::NoMatch,
            },
        }
    }
}

/// Extract the insured entity from `document` using the shared rule tables.
///
/// Fails only when the rule tables cannot be compiled.
pub fn extract(document: &str) -> Result<ExtractionResult> {
    Ok(Extractor::new()?.extract(document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tier;

    #[test]
    fn test_section_marker_scenario() {
        let result = extract("Named Insured: Acme Construction LLC. Policy Number: 123.").unwrap();
        assert_eq!(result, ExtractionResult::Found("Acme Construction LLC".to_string()));
    }

    #[test]
    fn test_primary_insured_scenario() {
        let result = extract("The primary insured is Johnson Family Farms").unwrap();
        assert_eq!(result, ExtractionResult::Found("Johnson Family Farms".to_string()));
    }

    #[test]
    fn test_no_capitalized_phrase_is_unknown() {
        let extraction = Extractor::new().unwrap().extract_detailed("claim form attached.");
        assert_eq!(extraction.result, ExtractionResult::Unknown);
        assert_eq!(extraction.provenance, Provenance::NoMatch);
    }

    #[test]
    fn test_pdf_metadata_is_degenerate() {
        let extraction = Extractor::new().unwrap().extract_detailed("  FitH null  ");
        assert_eq!(extraction.result.to_string(), "UNKNOWN (PDF parsing error)");
        assert_eq!(extraction.provenance, Provenance::Degenerate);
    }

    #[test]
    fn test_rule_provenance_is_reported() {
        let extraction = Extractor::new()
            .unwrap()
            .extract_detailed("Named Insured: Acme Construction LLC. Policy Number: 123.");
        assert_eq!(
            extraction.provenance,
            Provenance::Rule {
                tier: Tier::SectionMarker,
                rule: "marker:named_insured".to_string()
            }
        );
    }

    #[test]
    fn test_ranker_fallback_when_no_tier_matches() {
        // A lowercase word breaks the T4 run; the ranker's run allows it
        let doc = "Loss Report: Harbor View Marine of Tacoma.";
        let extraction = Extractor::new().unwrap().extract_detailed(doc);
        assert!(matches!(extraction.provenance, Provenance::Ranked { .. }));
        assert_eq!(extraction.result.name(), Some("Harbor View Marine of Tacoma"));
    }

    #[test]
    fn test_extractor_is_shareable_across_threads() {
        let extractor = Extractor::new().unwrap();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                std::thread::spawn(move || {
                    extractor.extract("Policy Holder: Cascade Timber Partners.")
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(
                handle.join().unwrap(),
                ExtractionResult::Found("Cascade Timber Partners".to_string())
            );
        }
    }
}
