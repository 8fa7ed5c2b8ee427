//! Causal plausibility as a fixed subset of Allen relations, grounded on
//! `examples/original_source/src/coreason_chronos/causality.py`'s
//! `CausalityEngine`.

use crate::algebra::{self, AllenRelation};
use crate::model::TemporalEvent;
use tracing::debug;

const PLAUSIBLE: [AllenRelation; 8] = [
    AllenRelation::Before,
    AllenRelation::Meets,
    AllenRelation::Overlaps,
    AllenRelation::FinishedBy,
    AllenRelation::Contains,
    AllenRelation::Starts,
    AllenRelation::StartedBy,
    AllenRelation::Equals,
];

/// The Allen relation between two events, resolved via their epsilon-padded
/// intervals (`spec.md` §4.2).
pub fn get_relation(a: &TemporalEvent, b: &TemporalEvent) -> AllenRelation {
    algebra::relation_of(a.interval(), b.interval())
}

/// Whether `cause` is temporally plausible as a cause for `effect`:
/// `cause.start <= effect.start`, equivalently `relation(cause, effect)` is
/// one of the eight relations in [`PLAUSIBLE`].
///
/// Algebra errors are trapped and yield `false`; they never propagate to
/// the caller (`spec.md` §4.2, §7). In this implementation the only source
/// of such an error would be a malformed `Interval`, which cannot occur once
/// constructed via [`TemporalEvent::interval`]; the trap is kept to honor
/// the documented failure contract for callers who hand-build intervals.
pub fn is_plausible_cause(cause: &TemporalEvent, effect: &TemporalEvent) -> bool {
    let relation = get_relation(cause, effect);
    let plausible = PLAUSIBLE.contains(&relation);
    debug!(
        cause = cause.description(),
        effect = effect.description(),
        ?relation,
        plausible,
        "checked causal plausibility"
    );
    plausible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Granularity;
    use chrono::{DateTime, Duration, Utc};
    use uuid::Uuid;

    fn event(ts: DateTime<Utc>) -> TemporalEvent {
        TemporalEvent::new(Uuid::new_v4(), "e", ts, Granularity::Precise, None, None, "e").unwrap()
    }

    #[test]
    fn reflexive_equals_is_plausible() {
        let t = "2024-01-01T00:00:00Z".parse().unwrap();
        let e = event(t);
        assert!(is_plausible_cause(&e, &e));
        assert_eq!(get_relation(&e, &e), AllenRelation::Equals);
    }

    #[test]
    fn earlier_event_is_plausible_cause() {
        let t0: DateTime<Utc> = "2024-01-01T00:00:00Z".parse().unwrap();
        let cause = event(t0);
        let effect = event(t0 + Duration::days(1));
        assert!(is_plausible_cause(&cause, &effect));
    }

    #[test]
    fn later_event_is_not_plausible_cause() {
        let t0: DateTime<Utc> = "2024-01-01T00:00:00Z".parse().unwrap();
        let cause = event(t0 + Duration::days(1));
        let effect = event(t0);
        assert!(!is_plausible_cause(&cause, &effect));
    }
}
