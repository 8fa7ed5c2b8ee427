//! Fuzzy matching for anchor resolution: a conservative token-set overlap
//! coefficient, since no `dateparser`-adjacent fuzzy-text library in this
//! pack targets the exact "how much of the anchor phrase is covered by this
//! candidate" question `spec.md` §4.5.4 asks. `strsim::jaro_winkler`, which
//! the teacher uses for cache-key fuzziness (`src/nlp/parser.rs`), answers a
//! different question (character-level edit distance) and would blur the
//! deterministic tie-breaking the extractor's tests rely on, so it is not
//! reused here.

use std::collections::HashSet;

const STOPWORDS: &[&str] = &[
    "the", "a", "an", "of", "to", "in", "on", "at", "for", "with", "by",
];

fn tokenize(s: &str) -> HashSet<String> {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .filter(|w| !STOPWORDS.contains(w))
        .map(str::to_string)
        .collect()
}

/// `|tokens(phrase) ∩ tokens(candidate)| / max(|tokens(phrase)|, 1)`
/// (`spec.md` §4.5.4). Asymmetric: scores how much of `phrase` the
/// candidate covers, not the reverse.
pub(crate) fn token_set_ratio(phrase: &str, candidate: &str) -> f64 {
    let phrase_tokens = tokenize(phrase);
    let candidate_tokens = tokenize(candidate);
    let denom = phrase_tokens.len().max(1) as f64;
    phrase_tokens.intersection(&candidate_tokens).count() as f64 / denom
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_overlap_scores_one() {
        assert_eq!(token_set_ratio("the second infusion", "Second Infusion Date"), 1.0);
    }

    #[test]
    fn partial_overlap_scores_fraction() {
        assert_eq!(token_set_ratio("the second infusion", "Third Infusion Date"), 0.5);
    }

    #[test]
    fn no_overlap_scores_zero() {
        assert_eq!(token_set_ratio("admission", "discharge summary"), 0.0);
    }

    #[test]
    fn empty_phrase_never_divides_by_zero() {
        assert_eq!(token_set_ratio("the of", "anything"), 0.0);
    }

    #[test]
    fn stopwords_are_ignored_on_both_sides() {
        assert_eq!(token_set_ratio("the infusion", "an infusion at the clinic"), 1.0);
    }
}
