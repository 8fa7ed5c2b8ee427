//! Core data model: [`TemporalEvent`] and the boundary types that cross the
//! library's API surface.
//!
//! `TemporalEvent` is built only through [`TemporalEvent::new`], which
//! enforces every invariant from `spec.md` §3 at construction time. Once
//! built, an event is immutable; there is no public mutator, matching the
//! Python prototype's `model_config = ConfigDict(frozen=True)`.

use crate::error::{ChronosError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Coarse indication of how much of an event's timestamp was specified in
/// the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Granularity {
    #[serde(rename = "PRECISE")]
    Precise,
    #[serde(rename = "DATE_ONLY")]
    DateOnly,
    #[serde(rename = "FUZZY")]
    Fuzzy,
}

/// A discovered event on the timeline.
///
/// Invariants enforced by [`TemporalEvent::new`]:
/// - `timestamp` is UTC-normalized (by construction, `DateTime<Utc>` is
///   always zone-aware).
/// - if both `duration_minutes` and `ends_at` are given,
///   `timestamp + duration_minutes == ends_at`.
/// - `ends_at`, if present, is strictly later than `timestamp`.
/// - `duration_minutes`, if present, is non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalEvent {
    id: Uuid,
    description: String,
    timestamp: DateTime<Utc>,
    granularity: Granularity,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ends_at: Option<DateTime<Utc>>,
    source_snippet: String,
}

impl TemporalEvent {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Uuid,
        description: impl Into<String>,
        timestamp: DateTime<Utc>,
        granularity: Granularity,
        duration_minutes: Option<i64>,
        ends_at: Option<DateTime<Utc>>,
        source_snippet: impl Into<String>,
    ) -> Result<Self> {
        if let Some(minutes) = duration_minutes {
            if minutes < 0 {
                return Err(ChronosError::InvalidEventConfig(
                    "duration_minutes must be non-negative".into(),
                ));
            }
        }

        if let Some(ends_at) = ends_at {
            if ends_at <= timestamp {
                return Err(ChronosError::InvalidEventConfig(
                    "ends_at must be after timestamp".into(),
                ));
            }
            if let Some(minutes) = duration_minutes {
                let expected = timestamp + Duration::minutes(minutes);
                if expected != ends_at {
                    return Err(ChronosError::InvalidEventConfig(
                        "timestamp + duration_minutes must equal ends_at".into(),
                    ));
                }
            }
        }

        Ok(Self {
            id,
            description: description.into(),
            timestamp,
            granularity,
            duration_minutes,
            ends_at,
            source_snippet: source_snippet.into(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn duration_minutes(&self) -> Option<i64> {
        self.duration_minutes
    }

    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        self.ends_at
    }

    pub fn source_snippet(&self) -> &str {
        &self.source_snippet
    }

    /// Resolves this event to the half-open `[start, end)` interval used by
    /// the algebra. Point events become epsilon intervals (`spec.md` §3) so
    /// the algebra remains total.
    pub fn interval(&self) -> Interval {
        let start = self.timestamp;
        let end = self
            .ends_at
            .or_else(|| {
                self.duration_minutes
                    .map(|m| start + Duration::minutes(m))
                    .filter(|end| *end > start)
            })
            .unwrap_or_else(|| start + Duration::microseconds(1));

        Interval { start, end }
    }
}

/// The `[start, end)` interval a [`TemporalEvent`] resolves to for algebra.
/// Internal to the crate's reasoning layer, never escaping as a standalone
/// public constructor; always derived from an event or built directly for
/// the algebra's own tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(ChronosError::InvalidInterval {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self { start, end })
    }
}

/// The result of a compliance check (`spec.md` §3, §4.3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceResult {
    pub is_compliant: bool,
    /// Signed drift (target minus deadline), serialized as total seconds.
    #[serde(with = "drift_as_seconds")]
    pub drift: Duration,
    pub message: Option<String>,
}

mod drift_as_seconds {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(drift: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(drift.num_milliseconds() as f64 / 1000.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let seconds = f64::deserialize(d)?;
        Ok(Duration::milliseconds((seconds * 1000.0).round() as i64))
    }
}

/// Boundary request for the external forecasting collaborator (`spec.md` §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    history: Vec<f64>,
    prediction_length: usize,
    confidence_level: f64,
}

impl ForecastRequest {
    pub fn new(history: Vec<f64>, prediction_length: usize, confidence_level: f64) -> Result<Self> {
        if history.is_empty() {
            return Err(ChronosError::InvalidForecastRequest(
                "history must not be empty".into(),
            ));
        }
        if history.iter().any(|x| !x.is_finite()) {
            return Err(ChronosError::InvalidForecastRequest(
                "history must not contain NaN or Inf values".into(),
            ));
        }
        if prediction_length == 0 {
            return Err(ChronosError::InvalidForecastRequest(
                "prediction_length must be positive".into(),
            ));
        }
        if !(confidence_level > 0.0 && confidence_level < 1.0) {
            return Err(ChronosError::InvalidForecastRequest(
                "confidence_level must be between 0.0 and 1.0".into(),
            ));
        }

        Ok(Self {
            history,
            prediction_length,
            confidence_level,
        })
    }

    pub fn history(&self) -> &[f64] {
        &self.history
    }

    pub fn prediction_length(&self) -> usize {
        self.prediction_length
    }

    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }
}

/// Boundary result from the external forecasting collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub median: Vec<f64>,
    pub lower_bound: Vec<f64>,
    pub upper_bound: Vec<f64>,
    pub confidence_level: f64,
}
