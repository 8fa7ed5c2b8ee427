//! Literal scenarios from `spec.md` §8 ("Concrete scenarios"), run as
//! integration tests against the public library surface.

use chrono::{DateTime, Duration, TimeZone, Utc};
use temporal_engine::algebra::{relation, AllenRelation};
use temporal_engine::causality::is_plausible_cause;
use temporal_engine::compliance::{MaxDelayRule, ValidationRule};
use temporal_engine::model::{Granularity, Interval, TemporalEvent};
use temporal_engine::TimelineExtractor;
use uuid::Uuid;

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

fn event(ts: DateTime<Utc>) -> TemporalEvent {
    TemporalEvent::new(Uuid::new_v4(), "e", ts, Granularity::Precise, None, None, "e").unwrap()
}

/// S1: chained anchors.
#[test]
fn s1_chained_anchors() {
    let text = "Start on Jan 1. Middle 2 days after Start. End 3 days after Middle.";
    let reference = utc(2024, 1, 1, 0, 0, 0);
    let events = TimelineExtractor::new().extract_events(text, reference);

    assert_eq!(events.len(), 3);
    assert_eq!(events[0].timestamp(), utc(2024, 1, 1, 0, 0, 0));
    assert_eq!(events[1].timestamp(), utc(2024, 1, 3, 0, 0, 0));
    assert_eq!(events[2].timestamp(), utc(2024, 1, 6, 0, 0, 0));
}

/// S2: pure-duration rejection.
#[test]
fn s2_pure_duration_rejection() {
    let text = "Patient is 50 years old.";
    let reference = utc(2024, 1, 10, 12, 0, 0);
    let events = TimelineExtractor::new().extract_events(text, reference);
    assert!(events.is_empty());
}

/// S3: fuzzy anchor disambiguation. Token overlap with "second infusion"
/// outweighs proximity to the nearer "Third Infusion" date.
#[test]
fn s3_fuzzy_anchor_disambiguation() {
    let text = "History: Second Infusion on Jan 10. Current: Third Infusion on Jan 20. \
                Reaction 2 days after the second infusion.";
    let reference = utc(2024, 2, 1, 0, 0, 0);
    let events = TimelineExtractor::new().extract_events(text, reference);

    let reaction = events
        .iter()
        .find(|e| e.timestamp() == utc(2024, 1, 12, 0, 0, 0));
    assert!(
        reaction.is_some(),
        "expected a reaction event anchored to Jan 10 + 2 days, got: {:#?}",
        events.iter().map(|e| e.timestamp()).collect::<Vec<_>>()
    );
}

/// S4: compliance across DST. One absolute hour elapsed (America/New_York
/// spring-forward), expressed directly in UTC since the crate's compliance
/// layer only accepts `DateTime<Utc>`.
#[test]
fn s4_compliance_across_dst() {
    let reference = utc(2024, 3, 10, 6, 30, 0); // 01:30 EST (UTC-5)
    let target = utc(2024, 3, 10, 7, 30, 0); // 03:30 EDT (UTC-4), one absolute hour later
    let rule = MaxDelayRule::new(Duration::hours(1)).unwrap();
    let result = rule.validate(target, reference).unwrap();

    assert!(result.is_compliant);
    assert_eq!(result.drift, Duration::zero());
}

/// S5: leap-day arithmetic.
#[test]
fn s5_leap_day_arithmetic() {
    let reference = utc(2024, 2, 28, 12, 0, 0);
    let target = utc(2024, 3, 1, 12, 0, 1);
    let rule = MaxDelayRule::new(Duration::hours(48)).unwrap();
    let result = rule.validate(target, reference).unwrap();

    assert!(!result.is_compliant);
    assert_eq!(result.drift, Duration::seconds(1));
}

/// S6: Allen microsecond boundary.
#[test]
fn s6_allen_microsecond_boundary() {
    let a_start = utc(2024, 1, 1, 12, 0, 0);
    let a_end = utc(2024, 1, 1, 14, 0, 0);
    let b_start_gap = a_end + Duration::microseconds(1);
    let b_end = utc(2024, 1, 1, 15, 0, 0);

    assert_eq!(
        relation(a_start, a_end, b_start_gap, b_end).unwrap(),
        AllenRelation::Before
    );
    assert_eq!(
        relation(a_start, a_end, a_end, b_end).unwrap(),
        AllenRelation::Meets
    );
}

/// Invariant 5 from `spec.md` §8, spelled out as its own scenario: a point
/// event is always a plausible cause of itself.
#[test]
fn reflexive_equals_is_a_plausible_cause() {
    let e = event(utc(2024, 1, 1, 0, 0, 0));
    assert!(is_plausible_cause(&e, &e));
}

/// Sanity check that `Interval` rejects a degenerate span directly, since the
/// algebra never accepts one (`spec.md` §4.1 preconditions).
#[test]
fn interval_rejects_non_strict_ordering() {
    let t = utc(2024, 1, 1, 0, 0, 0);
    assert!(Interval::new(t, t).is_err());
}
