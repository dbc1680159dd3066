//! Tiered matcher: applies the rule tables in priority order.

use tracing::debug;

use crate::constants::{HEADER_DENYLIST, MIN_MARKER_MATCH_CHARS};
use crate::pipeline::entity::{clean, extend};
use crate::pipeline::rules::{PatternRule, RuleSet};
use crate::types::Tier;

/// The raw text one rule captured, before any cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan<'a> {
    pub tier: Tier,
    pub rule: &'a str,
    pub text: &'a str,
    /// Byte offset of `text` in the normalized document
    pub start: usize,
}

/// A span a tier accepted, with the entity name derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierMatch {
    pub tier: Tier,
    pub rule: String,
    pub name: String,
}

/// Scan `rules` in declared order and return the first span `accept` turns into
/// a name. Within a rule, matches are visited left to right.
pub fn first_accepted<'a, F>(rules: &'a [PatternRule], text: &'a str, mut accept: F) -> Option<TierMatch>
where
    F: FnMut(&MatchSpan<'a>) -> Option<String>,
{
    for rule in rules {
        for caps in rule.regex.captures_iter(text) {
            let Some(group) = caps.get(rule.group) else {
                continue;
            };
            let span = MatchSpan {
                tier: rule.tier,
                rule: &rule.id,
                text: group.as_str(),
                start: group.start(),
            };
            if let Some(name) = accept(&span) {
                return Some(TierMatch {
                    tier: rule.tier,
                    rule: rule.id.clone(),
                    name,
                });
            }
            debug!("Rule '{}' rejected span '{}'", rule.id, span.text);
        }
    }
    None
}

/// Applies the four tiers against normalized text.
#[derive(Debug, Clone, Copy)]
pub struct TieredMatcher<'r> {
    rules: &'r RuleSet,
}

impl<'r> TieredMatcher<'r> {
    pub fn new(rules: &'r RuleSet) -> Self {
        Self { rules }
    }

    /// First accepted match of the highest tier that produces one.
    pub fn find(&self, text: &str) -> Option<TierMatch> {
        Tier::ALL.iter().find_map(|tier| self.match_tier(*tier, text))
    }

    pub fn match_tier(&self, tier: Tier, text: &str) -> Option<TierMatch> {
        let rules = self.rules.tier(tier);
        let found = match tier {
            Tier::PrimaryEntity => first_accepted(rules, text, |span| {
                Some(extend(text, span.text.trim(), &self.rules.extension_suffixes))
            }),
            Tier::SectionMarker => first_accepted(rules, text, |span| {
                let trimmed = span.text.trim();
                if trimmed.chars().count() < MIN_MARKER_MATCH_CHARS {
                    return None;
                }
                Some(clean(trimmed))
            }),
            Tier::BusinessName => first_accepted(rules, text, |span| Some(clean(span.text))),
            Tier::CapitalizedPhrase => first_accepted(rules, text, |span| {
                let entity = clean(span.text);
                (!is_header_phrase(&entity)).then_some(entity)
            }),
        };

        if let Some(m) = &found {
            debug!("{} rule '{}' matched '{}'", m.tier, m.rule, m.name);
        }
        found
    }
}

/// True when a phrase reads like a document header rather than a name.
pub fn is_header_phrase(phrase: &str) -> bool {
    let lower = phrase.to_lowercase();
    HEADER_DENYLIST.iter().any(|word| lower.contains(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> TieredMatcher<'static> {
        TieredMatcher::new(crate::pipeline::rules::rules().unwrap())
    }

    #[test]
    fn test_primary_entity_wins_over_business_name() {
        let text = "Vendor: Apex Roofing LLC. The primary insured is Johnson Family Farms";
        let m = matcher().find(text).unwrap();
        assert_eq!(m.tier, Tier::PrimaryEntity);
        assert_eq!(m.name, "Johnson Family Farms");
        assert_eq!(m.rule, "primary:primary_insured_is");
    }

    #[test]
    fn test_primary_entity_is_extended() {
        let text = "Principal insured: Acme Holdings, Inc. Policy period 2024";
        let m = matcher().match_tier(Tier::PrimaryEntity, text).unwrap();
        assert_eq!(m.name, "Acme Holdings Inc");
    }

    #[test]
    fn test_section_marker_match() {
        let text = "Named Insured: Acme Construction LLC. Policy Number: 123.";
        let m = matcher().match_tier(Tier::SectionMarker, text).unwrap();
        assert_eq!(m.name, "Acme Construction LLC");
        assert_eq!(m.rule, "marker:named_insured");
    }

    #[test]
    fn test_short_marker_match_is_skipped() {
        // "Bob" is too short; scanning moves on to the next marker
        let text = "Insured: Bob. Issued to: Carter Logistics Partners.";
        let m = matcher().match_tier(Tier::SectionMarker, text).unwrap();
        assert_eq!(m.name, "Carter Logistics Partners");
        assert_eq!(m.rule, "marker:issued_to");
    }

    #[test]
    fn test_business_suffix_before_indicator() {
        let text = "Northwind Medical Supply. Lakeside Builders Inc.";
        let m = matcher().match_tier(Tier::BusinessName, text).unwrap();
        assert!(m.rule.starts_with("suffix:"));
        assert!(m.name.ends_with("Inc"));
    }

    #[test]
    fn test_indicator_family_match() {
        let text = "see Northwind Medical Supply";
        let m = matcher().match_tier(Tier::BusinessName, text).unwrap();
        assert_eq!(m.rule, "indicator:medical");
        assert_eq!(m.name, "see Northwind Medical Supply");
    }

    #[test]
    fn test_capitalized_phrase_skips_headers() {
        let text = "Loss Report Summary. prepared for Mary Jane Watson.";
        let m = matcher().match_tier(Tier::CapitalizedPhrase, text).unwrap();
        assert_eq!(m.name, "Mary Jane Watson");
    }

    #[test]
    fn test_nothing_matches_lowercase_text() {
        assert!(matcher().find("claim form attached.").is_none());
    }

    #[test]
    fn test_first_accepted_reports_span_offsets() {
        let rules = crate::pipeline::rules::rules().unwrap();
        let text = "x Mary Jane.";
        let mut seen = Vec::new();
        first_accepted(&rules.capitalized_phrase, text, |span| {
            seen.push((span.start, span.text.to_string()));
            None
        });
        assert_eq!(seen, vec![(2, "Mary Jane".to_string())]);
    }
}
