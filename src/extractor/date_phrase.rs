//! Date Phrase Parser: scans free text for date-shaped substrings and
//! resolves each to an absolute UTC instant, mirroring the contract of
//! Python's `dateparser.search_dates` that
//! `examples/original_source/src/coreason_chronos/timeline_extractor.py`
//! builds on, "scan, parse each hit, silently skip misses", without
//! actually depending on that library, since `dateparser` has no Rust
//! counterpart in this pack.
//!
//! `chrono-english` supplies the relative-date grammar ("next monday", "3
//! days ago", "tomorrow at 3pm"); a small candidate regex narrows the scan to
//! date-shaped substrings first so we never hand it narrative prose it was
//! never meant to parse. This candidate-then-delegate shape is grounded on
//! the teacher's `parse_chrono_candidate` in `src/nlp/rules.rs`, reimplemented
//! over `regex` instead of `nom` since the teacher's `Cargo.toml` never
//! actually declares `nom` as a dependency.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_english::{parse_date_string, Dialect};
use once_cell::sync::Lazy;
use regex::Regex;

const MONTHS: &str = r"jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|jun(?:e)?|jul(?:y)?|aug(?:ust)?|sep(?:tember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";

static CANDIDATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?ix)
        \d{{4}}-\d{{2}}-\d{{2}}(?:[T\s]\d{{2}}:\d{{2}}(?::\d{{2}})?)?
        |(?:{months})\.?\s+\d{{1,2}}(?:st|nd|rd|th)?(?:,?\s+\d{{4}})?
        |(?:today|tomorrow|yesterday)(?:\s+at\s+\d{{1,2}}(?::\d{{2}})?\s*(?:am|pm)?)?
        |(?:next|last|this)\s+(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday)
        |\d+(?:\.\d+)?\s+(?:year|month|week|day|hour|minute|second)s?\s+ago
        |\d+\s+(?:year|month|week|day|hour|minute|second)s?
        ",
        months = MONTHS
    ))
    .expect("candidate regex is a fixed, compile-time-checked pattern")
});

static PURE_DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\d+\s+(?:year|month|week|day|hour|minute|second)s?$")
        .expect("pure-duration regex is a fixed, compile-time-checked pattern")
});

/// A date phrase found in `text`, already resolved to an absolute instant.
/// No span: callers re-locate the snippet in the source via a monotonic
/// cursor (`spec.md` §4.5.1 step 3), matching `dateparser.search_dates`'s own
/// contract of returning `(snippet, datetime)` pairs with no position.
#[derive(Debug, Clone)]
pub(crate) struct DatePhraseMatch {
    pub snippet: String,
    pub timestamp: DateTime<Utc>,
}

/// Scans `text` for date-shaped phrases relative to `reference`, in textual
/// order, discarding bare duration fragments ("50 years", "3 months")
/// misread as dates (`spec.md` §4.5.1 step 1).
pub(crate) fn scan(text: &str, reference: DateTime<Utc>) -> Vec<DatePhraseMatch> {
    let mut out = Vec::new();
    for m in CANDIDATE.find_iter(text) {
        let snippet = m.as_str();
        if PURE_DURATION.is_match(snippet.trim()) {
            tracing::debug!(snippet, "discarding pure-duration snippet misread as a date");
            continue;
        }
        match resolve(snippet, reference) {
            Some(timestamp) => out.push(DatePhraseMatch {
                snippet: snippet.to_string(),
                timestamp,
            }),
            None => tracing::debug!(snippet, "date phrase parser declined snippet"),
        }
    }
    out
}

fn resolve(snippet: &str, reference: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if let Some(naive) = parse_iso(snippet) {
        return Some(Utc.from_utc_datetime(&naive));
    }

    let scratch_now = to_local_scratch(reference.naive_utc());
    let parsed = parse_date_string(snippet, scratch_now, Dialect::Us).ok()?;
    Some(Utc.from_utc_datetime(&parsed.naive_local()))
}

fn parse_iso(snippet: &str) -> Option<NaiveDateTime> {
    const FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(snippet, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(snippet, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Reinterprets `naive` (itself already the UTC wall-clock reading of the
/// reference date) as a `Local` instant purely so `chrono-english`'s
/// relative-date grammar has a `now` to anchor against; `parse_date_string`
/// has no `Utc`-generic entry point. Only the naive calendar fields of its
/// result are ever read back (`resolve`), so the host machine's actual
/// timezone never leaks into a result: this keeps extraction deterministic
/// across machines, mirroring the Python prototype's naive `RELATIVE_BASE` +
/// "assume UTC" handling.
fn to_local_scratch(naive: NaiveDateTime) -> DateTime<Local> {
    match Local.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) => dt,
        chrono::LocalResult::Ambiguous(dt, _) => dt,
        chrono::LocalResult::None => Local
            .from_local_datetime(&(naive + chrono::Duration::hours(1)))
            .single()
            .expect("shifting past a spring-forward gap by an hour always resolves"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn resolves_iso_date() {
        let hits = scan("Admission on 2024-01-10.", reference());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].timestamp, Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap());
    }

    #[test]
    fn resolves_iso_datetime() {
        let hits = scan("Logged at 2024-01-10T08:30:00.", reference());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].timestamp, Utc.with_ymd_and_hms(2024, 1, 10, 8, 30, 0).unwrap());
    }

    #[test]
    fn resolves_month_day_year() {
        let hits = scan("The visit occurred on Jan 10, 2024.", reference());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].timestamp.date_naive(), Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap().date_naive());
    }

    #[test]
    fn discards_pure_duration_snippet() {
        let hits = scan("The patient is 50 years old.", reference());
        assert!(hits.is_empty());
    }

    #[test]
    fn keeps_relative_ago_phrase() {
        let hits = scan("Onset was 2 days ago.", reference());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].timestamp, reference() - chrono::Duration::days(2));
    }

    #[test]
    fn resolves_next_weekday_to_a_future_monday() {
        use chrono::Datelike;
        let hits = scan("Follow-up next monday.", reference());
        assert_eq!(hits.len(), 1);
        assert!(hits[0].timestamp > reference());
        assert_eq!(hits[0].timestamp.weekday(), chrono::Weekday::Mon);
    }

    #[test]
    fn repeated_snippet_is_scanned_twice_in_order() {
        let hits = scan("Jan 10, 2024 was day one. Jan 10, 2024 again confirmed.", reference());
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].timestamp, hits[1].timestamp);
    }
}
