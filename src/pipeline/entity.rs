use regex::Regex;
use tracing::debug;

use crate::constants::{EXTENSION_LOOKAHEAD_CHARS, SHORT_SUFFIX_TOKENS, TRUNCATED_WORD_MAX_CHARS};
use crate::pipeline::normalizer::collapse_whitespace;

const TRAILING_PUNCTUATION: &[char] = &[',', '.', ':', ';'];

/// Clean up a matched span: drop trailing punctuation, collapse whitespace and
/// cut a short trailing fragment left behind by truncation.
///
/// Repeated until nothing changes, so cleaning an already clean name is a no-op.
pub fn clean(name: &str) -> String {
    let mut current = clean_once(name);
    loop {
        let next = clean_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_once(name: &str) -> String {
    let trimmed = name.trim();
    let stripped = trimmed
        .strip_suffix(TRAILING_PUNCTUATION)
        .unwrap_or(trimmed);
    let collapsed = collapse_whitespace(stripped);

    let words: Vec<&str> = collapsed.split(' ').collect();
    if words.len() > 2 {
        if let Some(last) = words.last() {
            if looks_truncated(last) {
                return words[..words.len() - 1].join(" ");
            }
        }
    }
    collapsed
}

fn looks_truncated(word: &str) -> bool {
    word.chars().count() <= TRUNCATED_WORD_MAX_CHARS
        && !SHORT_SUFFIX_TOKENS.contains(&word.to_lowercase().as_str())
}

/// Try to complete a truncated primary-entity name with a business suffix found
/// just after it in the document.
pub fn extend(text: &str, partial: &str, suffixes: &[Regex]) -> String {
    let Some(pos) = text.find(partial) else {
        return partial.to_string();
    };

    let after = &text[pos + partial.len()..];
    let look_ahead = match after.char_indices().nth(EXTENSION_LOOKAHEAD_CHARS) {
        Some((end, _)) => &after[..end],
        None => after,
    };

    for suffix in suffixes {
        if let Some(m) = suffix.find(look_ahead) {
            let extended = format!("{} {}", partial, m.as_str().trim());
            debug!("Extended '{}' to '{}'", partial, extended);
            return extended;
        }
    }

    partial.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::rules::RuleSet;

    #[test]
    fn test_clean_strips_trailing_punctuation() {
        assert_eq!(clean("Acme Builders LLC,"), "Acme Builders LLC");
        assert_eq!(clean("Acme Builders:"), "Acme Builders");
        assert_eq!(clean("  Acme   Builders  "), "Acme Builders");
    }

    #[test]
    fn test_clean_drops_truncated_trailing_word() {
        assert_eq!(clean("Johnson Family Farms Th"), "Johnson Family Farms");
        // Two words are never cut
        assert_eq!(clean("Acme Ab"), "Acme Ab");
    }

    #[test]
    fn test_clean_keeps_short_suffix_tokens() {
        assert_eq!(clean("Acme Builders Inc"), "Acme Builders Inc");
        assert_eq!(clean("Acme Builders llc"), "Acme Builders llc");
        assert_eq!(clean("Smith and Sons Co."), "Smith and Sons Co");
        assert_eq!(clean("Acme Building LTD"), "Acme Building LTD");
    }

    #[test]
    fn test_clean_is_idempotent() {
        let samples = [
            "Acme Builders LLC.",
            "Alpha Beta Gam Xy",
            "Acme Corp.,",
            "North Star Logistics, Inc.",
            "A B C D E",
            "Alpha Beta, Xy",
            "",
            "  ;",
            "Riley HealthCare LLC",
        ];
        for sample in samples {
            let once = clean(sample);
            assert_eq!(clean(&once), once, "clean not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_extend_appends_nearby_suffix() {
        let rules = RuleSet::build().unwrap();
        let text = "primary insured: Acme Holdings, Inc. located at 12 Elm St";
        assert_eq!(extend(text, "Acme Holdings", &rules.extension_suffixes), "Acme Holdings Inc");
    }

    #[test]
    fn test_extend_without_suffix_is_unchanged() {
        let rules = RuleSet::build().unwrap();
        let text = "The primary insured is Johnson Family Farms";
        assert_eq!(
            extend(text, "Johnson Family Farms", &rules.extension_suffixes),
            "Johnson Family Farms"
        );
        assert_eq!(extend(text, "Not Present", &rules.extension_suffixes), "Not Present");
    }

    #[test]
    fn test_extend_only_looks_thirty_chars_ahead() {
        let rules = RuleSet::build().unwrap();
        let text = format!("Acme Holdings{} LLC", " filler".repeat(6));
        assert_eq!(extend(&text, "Acme Holdings", &rules.extension_suffixes), "Acme Holdings");
    }

    #[test]
    fn test_extend_checks_suffixes_in_priority_order() {
        let rules = RuleSet::build().unwrap();
        let text = "Acme Holdings Group LLC";
        assert_eq!(extend(text, "Acme Holdings", &rules.extension_suffixes), "Acme Holdings LLC");
    }
}
