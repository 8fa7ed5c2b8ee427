//! Deadline-compliance evaluation, grounded on
//! `examples/original_source/src/coreason_chronos/validator.py`.
//!
//! Modeled as a small trait with a single `validate` method and one initial
//! variant, `MaxDelayRule`; additional rules are new variants, no
//! inheritance hierarchy (`spec.md` §9).

use crate::error::{ChronosError, Result};
use crate::model::ComplianceResult;
use chrono::{DateTime, Duration, Utc};

pub trait ValidationRule {
    fn validate(&self, target: DateTime<Utc>, reference: DateTime<Utc>) -> Result<ComplianceResult>;
}

/// Ensures an event happens within `max_delay` of a reference event:
/// `target <= reference + max_delay`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxDelayRule {
    max_delay: Duration,
}

impl MaxDelayRule {
    pub fn new(max_delay: Duration) -> Result<Self> {
        if max_delay < Duration::zero() {
            return Err(ChronosError::InvalidEventConfig(
                "max_delay must be non-negative".into(),
            ));
        }
        Ok(Self { max_delay })
    }

    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }
}

impl ValidationRule for MaxDelayRule {
    fn validate(&self, target: DateTime<Utc>, reference: DateTime<Utc>) -> Result<ComplianceResult> {
        // `DateTime<Utc>` is already absolute-instant arithmetic, so a
        // 48-hour delay across a leap day or DST transition needs no special
        // handling here; the caller is responsible for converting any
        // zoned input to `Utc` before calling.
        let deadline = reference + self.max_delay;
        let drift = target - deadline;
        let is_compliant = drift <= Duration::zero();

        let message = if is_compliant {
            None
        } else {
            Some(format!(
                "Violation: event occurred {drift} after the deadline.",
                drift = human_duration(drift)
            ))
        };

        Ok(ComplianceResult {
            is_compliant,
            drift,
            message,
        })
    }
}

fn human_duration(d: Duration) -> String {
    format!("{}s", d.num_milliseconds() as f64 / 1000.0)
}
