//! Fallback ranking of capitalized phrases when no tiered rule matched.

use regex::Regex;
use tracing::debug;

use crate::constants::{
    RANKER_BUSINESS_WORDS, RANKER_NON_ENTITY_PHRASES, RANKER_SUFFIXES, SCORE_BUSINESS_WORD,
    SCORE_NON_ENTITY_PENALTY, SCORE_SUFFIX, SCORE_WORD_COUNT,
};
use crate::pipeline::entity::clean;
use crate::types::Candidate;

/// Score how likely a phrase is to be a company or person name. Scores can go
/// negative; there is no floor.
pub fn score_candidate(phrase: &str) -> f64 {
    let lower = phrase.to_lowercase();
    let word_count = phrase.split_whitespace().count();
    let mut score = 0.0;

    if (2..=5).contains(&word_count) {
        score += SCORE_WORD_COUNT;
    }
    if RANKER_SUFFIXES.iter().any(|suffix| lower.contains(suffix)) {
        score += SCORE_SUFFIX;
    }
    if RANKER_BUSINESS_WORDS.iter().any(|word| lower.contains(word)) {
        score += SCORE_BUSINESS_WORD;
    }
    if RANKER_NON_ENTITY_PHRASES.iter().any(|p| lower.contains(p)) {
        score += SCORE_NON_ENTITY_PENALTY;
    }

    score
}

/// Collect every cleaned capitalized run of two or more words, in scan order.
pub fn collect_candidates(pattern: &Regex, text: &str) -> Vec<Candidate> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| clean(m.as_str()))
        .filter(|phrase| phrase.split_whitespace().count() >= 2)
        .map(|name| {
            let score = score_candidate(&name);
            Candidate { name, score }
        })
        .collect()
}

/// Candidates ordered best first. Equal scores keep their scan order.
pub fn rank_candidates(pattern: &Regex, text: &str) -> Vec<Candidate> {
    let mut candidates = collect_candidates(pattern, text);
    // sort_by is stable, which is what breaks ties by first occurrence
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    debug!("Ranked {} candidates", candidates.len());
    candidates
}
