//! Allen's interval algebra: a total classifier over pairs of closed
//! intervals, grounded directly on
//! `examples/original_source/src/coreason_chronos/utils/algebra.py`.
//!
//! A closed enumeration dispatched by sequential comparison, not a class
//! family (`spec.md` §9).

use crate::error::{ChronosError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllenRelation {
    Before,
    After,
    Meets,
    MetBy,
    Overlaps,
    OverlappedBy,
    Starts,
    StartedBy,
    Finishes,
    FinishedBy,
    During,
    Contains,
    Equals,
}

impl AllenRelation {
    /// The converse relation: `relation(a, b)` and `relation(b, a)` are
    /// always converses of one another (`spec.md` §8, invariant 4).
    pub fn converse(self) -> Self {
        match self {
            Self::Before => Self::After,
            Self::After => Self::Before,
            Self::Meets => Self::MetBy,
            Self::MetBy => Self::Meets,
            Self::Overlaps => Self::OverlappedBy,
            Self::OverlappedBy => Self::Overlaps,
            Self::Starts => Self::StartedBy,
            Self::StartedBy => Self::Starts,
            Self::Finishes => Self::FinishedBy,
            Self::FinishedBy => Self::Finishes,
            Self::During => Self::Contains,
            Self::Contains => Self::During,
            Self::Equals => Self::Equals,
        }
    }
}

/// Classifies the relationship of interval `[a_start, a_end)` to interval
/// `[b_start, b_end)`.
///
/// # Errors
///
/// Returns [`ChronosError::InvalidInterval`] if either interval has
/// `start >= end`. Point events are not accepted directly here; callers
/// (the causality layer) promote them to epsilon intervals first.
///
/// Evaluated top-to-bottom; first match wins, matching the decision table in
/// `spec.md` §4.1. Microsecond resolution is preserved throughout since all
/// comparisons are on `chrono::DateTime<Utc>`.
pub fn relation(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> Result<AllenRelation> {
    if a_start >= a_end {
        return Err(ChronosError::InvalidInterval {
            start: a_start.to_rfc3339(),
            end: a_end.to_rfc3339(),
        });
    }
    if b_start >= b_end {
        return Err(ChronosError::InvalidInterval {
            start: b_start.to_rfc3339(),
            end: b_end.to_rfc3339(),
        });
    }

    if a_end < b_start {
        return Ok(AllenRelation::Before);
    }
    if a_start > b_end {
        return Ok(AllenRelation::After);
    }
    if a_end == b_start {
        return Ok(AllenRelation::Meets);
    }
    if a_start == b_end {
        return Ok(AllenRelation::MetBy);
    }
    if a_start < b_start && b_start < a_end && a_end < b_end {
        return Ok(AllenRelation::Overlaps);
    }
    if b_start < a_start && a_start < b_end && b_end < a_end {
        return Ok(AllenRelation::OverlappedBy);
    }
    if a_start == b_start && a_end < b_end {
        return Ok(AllenRelation::Starts);
    }
    if a_start == b_start && a_end > b_end {
        return Ok(AllenRelation::StartedBy);
    }
    if a_end == b_end && a_start > b_start {
        return Ok(AllenRelation::Finishes);
    }
    if a_end == b_end && a_start < b_start {
        return Ok(AllenRelation::FinishedBy);
    }
    if a_start > b_start && a_end < b_end {
        return Ok(AllenRelation::During);
    }
    if a_start < b_start && a_end > b_end {
        return Ok(AllenRelation::Contains);
    }
    // a_start == b_start && a_end == b_end, the only remaining case once both
    // intervals are guaranteed valid.
    Ok(AllenRelation::Equals)
}

/// Convenience overload for already-resolved [`crate::model::Interval`]
/// pairs, used by the causality layer where validity is guaranteed by
/// construction.
pub fn relation_of(a: crate::model::Interval, b: crate::model::Interval) -> AllenRelation {
    relation(a.start, a.end, b.start, b.end).expect("Interval invariant guarantees start < end")
}
