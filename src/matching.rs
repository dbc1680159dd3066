//! Match an extracted name against the registry of known insureds.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{NO_MATCH_NAME, UNKNOWN};

static CORPORATE_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    // Constant pattern; a failure here is caught by the unit tests
    Regex::new(r"(?i)\b(?:inc\.?|llc|ltd\.?|corp\.?|co\.?)\b").expect("valid suffix pattern")
});

/// A known insured as listed in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuredRecord {
    pub internal_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// Empty when nothing matched
    pub internal_id: String,
    pub name: String,
    pub confidence: f64,
}

impl MatchResult {
    pub fn no_match() -> Self {
        Self {
            internal_id: String::new(),
            name: NO_MATCH_NAME.to_string(),
            confidence: 0.0,
        }
    }

    pub fn is_match(&self) -> bool {
        !self.internal_id.is_empty()
    }
}

/// Lowercase, drop `.` and `,`, collapse whitespace and remove corporate suffix words.
pub fn normalize_name(name: &str) -> String {
    let lowered = name.to_lowercase().replace(['.', ','], "");
    let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");
    CORPORATE_SUFFIX.replace_all(&collapsed, "").trim().to_string()
}

/// Dice coefficient over character bigrams, whitespace ignored.
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::sorensen_dice(a, b)
}

/// Best registry entry for `extracted`, or "No match found" when the best
/// similarity is under `threshold` or the extraction was UNKNOWN.
pub fn find_best_match(extracted: &str, registry: &[InsuredRecord], threshold: f64) -> MatchResult {
    let normalized = normalize_name(extracted);
    if normalized == UNKNOWN.to_lowercase() || normalized.starts_with("unknown (") {
        return MatchResult::no_match();
    }

    let mut best: Option<MatchResult> = None;
    for insured in registry {
        let confidence = similarity(&normalized, &normalize_name(&insured.name));
        if best.as_ref().map_or(true, |b| confidence > b.confidence) {
            best = Some(MatchResult {
                internal_id: insured.internal_id.clone(),
                name: insured.name.clone(),
                confidence,
            });
        }
    }

    match best {
        Some(m) if m.confidence >= threshold => {
            debug!("Matched '{}' to '{}' ({:.2})", extracted, m.name, m.confidence);
            m
        }
        _ => MatchResult::no_match(),
    }
}
