//! Anchor-candidate detection: `"<value> <unit> (after|before) <phrase>"`
//! fragments whose timestamp is only knowable once `<phrase>` resolves to an
//! already-discovered event (`spec.md` §4.5.2).

use crate::duration::DurationUnit;
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    After,
    Before,
}

#[derive(Debug, Clone)]
pub(crate) struct AnchorCandidate {
    pub value: f64,
    pub unit: DurationUnit,
    pub direction: Direction,
    pub anchor_phrase: String,
    /// Byte span of `"<value> <unit> (after|before) <phrase>"`, not
    /// including the terminator that closed the phrase.
    pub span: (usize, usize),
    pub full_match: String,
}

static ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(\d+(?:\.\d+)?)\s+(year|month|week|day|hour|minute|second)s?\s+(after|before)\s+([^.,;\n]+?)(?:[.,;]|$)",
    )
    .expect("anchor regex is a fixed, compile-time-checked pattern")
});

/// Finds every anchor candidate in `text`, in textual order.
pub(crate) fn scan(text: &str) -> Vec<AnchorCandidate> {
    let mut out = Vec::new();
    for caps in ANCHOR.captures_iter(text) {
        let whole = caps.get(0).expect("group 0 always matches");
        let phrase_match = match caps.get(4) {
            Some(m) => m,
            None => continue,
        };
        let phrase = phrase_match.as_str().trim();
        if phrase.is_empty() {
            continue;
        }
        let value: f64 = match caps[1].parse() {
            Ok(v) => v,
            Err(_) => continue,
        };
        let unit = match DurationUnit::parse_str(&caps[2]) {
            Some(u) => u,
            None => continue,
        };
        let direction = if caps[3].eq_ignore_ascii_case("after") {
            Direction::After
        } else {
            Direction::Before
        };

        let phrase_end = phrase_match.start() + phrase_match.as_str().trim_end().len();
        let span = (whole.start(), phrase_end);
        out.push(AnchorCandidate {
            value,
            unit,
            direction,
            anchor_phrase: phrase.to_string(),
            span,
            full_match: text[whole.start()..phrase_end].to_string(),
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_after_phrase() {
        let hits = scan("2 days after admission, rash appeared.");
        assert_eq!(hits.len(), 1);
        let c = &hits[0];
        assert_eq!(c.value, 2.0);
        assert_eq!(c.unit, DurationUnit::Day);
        assert_eq!(c.direction, Direction::After);
        assert_eq!(c.anchor_phrase, "admission");
    }

    #[test]
    fn parses_before_phrase_with_multi_word_anchor() {
        let hits = scan("3 hours before the second infusion, labs were drawn.");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].direction, Direction::Before);
        assert_eq!(hits[0].anchor_phrase, "the second infusion");
    }

    #[test]
    fn supports_fractional_value() {
        let hits = scan("2.5 days after onset, fever resolved.");
        assert_eq!(hits[0].value, 2.5);
    }

    #[test]
    fn phrase_terminates_at_end_of_string_without_punctuation() {
        let hits = scan("1 week after discharge");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].anchor_phrase, "discharge");
    }

    #[test]
    fn finds_multiple_candidates_in_order() {
        let hits = scan("2 days after admission, then 3 days after that rash appeared.");
        assert_eq!(hits.len(), 2);
        assert!(hits[0].span.0 < hits[1].span.0);
    }
}
