//! Rule tables for the tiered matcher.
//!
//! Every tier is plain data: a list of `PatternRule`s in declared order. The
//! tables are compiled once per process and shared read-only by all calls.

use once_cell::sync::OnceCell;
use regex::Regex;
use tracing::debug;

use crate::constants::{
    BUSINESS_INDICATORS, COMPANY_SUFFIXES, ENTITY_CHARS, ENTITY_TERMINATOR, EXTENSION_SUFFIXES,
    PRIMARY_ENTITY_PATTERNS, RANKER_MAX_RUN_CHARS, RANKER_MIN_RUN_CHARS, SECTION_MARKERS,
};
use crate::error::{ExtractorError, Result};
use crate::types::Tier;

/// One compiled rule: where it sits in the cascade, what it matches, and which
/// capture group holds the entity text.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub tier: Tier,
    pub id: String,
    pub regex: Regex,
    pub group: usize,
}

impl PatternRule {
    pub fn new(tier: Tier, id: impl Into<String>, pattern: &str, group: usize) -> Result<Self> {
        let id = id.into();
        let regex = compile(&id, pattern)?;
        Ok(Self { tier, id, regex, group })
    }
}

/// The full, immutable rule set.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub primary_entity: Vec<PatternRule>,
    pub section_marker: Vec<PatternRule>,
    pub business_name: Vec<PatternRule>,
    pub capitalized_phrase: Vec<PatternRule>,
    /// Capitalized runs scanned by the fallback ranker
    pub candidate_run: Regex,
    /// Suffix probes used to extend truncated T1 names, in priority order
    pub extension_suffixes: Vec<Regex>,
}

impl RuleSet {
    pub fn build() -> Result<Self> {
        let primary_entity = PRIMARY_ENTITY_PATTERNS
            .iter()
            .map(|(id, pattern)| {
                PatternRule::new(
                    Tier::PrimaryEntity,
                    format!("primary:{}", id),
                    &format!("(?i){}", pattern),
                    1,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        let section_marker = SECTION_MARKERS
            .iter()
            .map(|(id, marker)| {
                PatternRule::new(
                    Tier::SectionMarker,
                    format!("marker:{}", id),
                    &format!("(?i){}([A-Z]{}+){}", marker, ENTITY_CHARS, ENTITY_TERMINATOR),
                    1,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        // Suffix family is declared ahead of the indicator family
        let mut business_name = COMPANY_SUFFIXES
            .iter()
            .map(|(token, fragment)| {
                PatternRule::new(
                    Tier::BusinessName,
                    format!("suffix:{}", token.to_lowercase()),
                    &format!(r"(?i)([A-Z]{}+\s+{}){}", ENTITY_CHARS, fragment, ENTITY_TERMINATOR),
                    1,
                )
            })
            .collect::<Result<Vec<_>>>()?;
        for indicator in BUSINESS_INDICATORS {
            business_name.push(PatternRule::new(
                Tier::BusinessName,
                format!("indicator:{}", indicator.to_lowercase()),
                &format!(
                    r"(?i)([A-Z]{chars}*\s+{word}\s+{chars}*){term}",
                    chars = ENTITY_CHARS,
                    word = indicator,
                    term = ENTITY_TERMINATOR
                ),
                1,
            )?);
        }

        // Case-sensitive on purpose: capitalization is the only signal here
        let capitalized_phrase = vec![PatternRule::new(
            Tier::CapitalizedPhrase,
            "capitalized:words_2_to_6",
            &format!(r"([A-Z][a-z]+(?:\s+[A-Z][a-z]+){{1,5}}){}", ENTITY_TERMINATOR),
            1,
        )?];

        let candidate_run = compile(
            "ranker:capitalized_run",
            &format!(
                r"([A-Z]{}{{{},{}}}){}",
                ENTITY_CHARS, RANKER_MIN_RUN_CHARS, RANKER_MAX_RUN_CHARS, ENTITY_TERMINATOR
            ),
        )?;

        let extension_suffixes = EXTENSION_SUFFIXES
            .iter()
            .map(|suffix| {
                compile(
                    &format!("extend:{}", suffix.to_lowercase()),
                    &format!(r"(?i)\s+{}\.?\b", suffix),
                )
            })
            .collect::<Result<Vec<_>>>()?;

        let rules = Self {
            primary_entity,
            section_marker,
            business_name,
            capitalized_phrase,
            candidate_run,
            extension_suffixes,
        };
        debug!("Compiled rule set with {} tiered rules", rules.len());
        Ok(rules)
    }

    /// Rules of one tier, in evaluation order.
    pub fn tier(&self, tier: Tier) -> &[PatternRule] {
        match tier {
            Tier::PrimaryEntity => &self.primary_entity,
            Tier::SectionMarker => &self.section_marker,
            Tier::BusinessName => &self.business_name,
            Tier::CapitalizedPhrase => &self.capitalized_phrase,
        }
    }

    pub fn len(&self) -> usize {
        Tier::ALL.iter().map(|tier| self.tier(*tier).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

static RULES: OnceCell<RuleSet> = OnceCell::new();

/// The process-wide rule set, compiled on first use.
pub fn rules() -> Result<&'static RuleSet> {
    RULES.get_or_try_init(RuleSet::build)
}

fn compile(id: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| ExtractorError::Pattern {
        rule: id.to_string(),
        source,
    })
}
