use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::UNKNOWN;

/// The outcome of one extraction call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ExtractionResult {
    /// A best-guess insured entity name
    Found(String),
    /// Nothing in the text looked like an insured entity
    Unknown,
    /// The text was unusable; the reason is kept for diagnostics
    UnknownReason(String),
}

impl ExtractionResult {
    pub fn is_found(&self) -> bool {
        matches!(self, ExtractionResult::Found(_))
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            ExtractionResult::Found(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for ExtractionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionResult::Found(name) => f.write_str(name),
            ExtractionResult::Unknown => f.write_str(UNKNOWN),
            ExtractionResult::UnknownReason(reason) => write!(f, "{} ({})", UNKNOWN, reason),
        }
    }
}

/// Priority levels of the matching rules, highest confidence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Explicit "primary insured" / "principal insured" phrasing
    PrimaryEntity,
    /// Name following a section label such as "Named Insured:"
    SectionMarker,
    /// Phrase carrying a legal suffix or business indicator word
    BusinessName,
    /// Any run of capitalized words not on the header denylist
    CapitalizedPhrase,
}

impl Tier {
    pub const ALL: [Tier; 4] = [
        Tier::PrimaryEntity,
        Tier::SectionMarker,
        Tier::BusinessName,
        Tier::CapitalizedPhrase,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::PrimaryEntity => "primary_entity",
            Tier::SectionMarker => "section_marker",
            Tier::BusinessName => "business_name",
            Tier::CapitalizedPhrase => "capitalized_phrase",
        }
    }

    /// 1-based tier number, T1 being the most trusted.
    pub fn rank(&self) -> u8 {
        match self {
            Tier::PrimaryEntity => 1,
            Tier::SectionMarker => 2,
            Tier::BusinessName => 3,
            Tier::CapitalizedPhrase => 4,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{} ({})", self.rank(), self.as_str())
    }
}

/// A scored guess from the fallback ranker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub name: String,
    pub score: f64,
}

/// Which stage of the cascade produced the result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum Provenance {
    /// Short-circuited by the normalizer on PDF metadata
    Degenerate,
    /// A tiered rule matched
    Rule { tier: Tier, rule: String },
    /// The ranker picked the top of `candidates` (in ranked order)
    Ranked { score: f64, candidates: Vec<Candidate> },
    /// No tier matched and the ranker had no candidates
    NoMatch,
}

impl Provenance {
    pub fn outcome(&self) -> &'static str {
        match self {
            Provenance::Degenerate => "degenerate",
            Provenance::Rule { .. } => "rule",
            Provenance::Ranked { .. } => "ranked",
            Provenance::NoMatch => "no_match",
        }
    }
}

/// An extraction result together with how it was reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extraction {
    pub result: ExtractionResult,
    pub provenance: Provenance,
}
