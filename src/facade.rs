//! Orchestrator: the composed entry point most callers want, wiring together
//! the extractor, causality engine, compliance validator, and forecaster.
//! Grounded on the Python prototype's facade,
//! `examples/original_source/src/coreason_chronos/agent.py`'s
//! `ChronosTimekeeper`, which composes the same four collaborators behind
//! `extract_from_text` / `forecast_series` / `check_compliance` /
//! `analyze_causality` methods.
//!
//! The core is synchronous and CPU-bound throughout (no I/O), so the async
//! surface exists only to let callers embedded in a `tokio` runtime avoid
//! blocking their executor. It offloads the same synchronous calls onto
//! `tokio::task::spawn_blocking`, the same pattern the teacher uses in
//! `src/daemon.rs` to keep blocking work off the async event loop.

use crate::algebra::AllenRelation;
use crate::causality;
use crate::compliance::ValidationRule;
use crate::error::{ChronosError, Result};
use crate::extractor::TimelineExtractor;
use crate::forecast::{Forecaster, NaiveForecaster};
use crate::model::{ComplianceResult, ForecastRequest, ForecastResult, TemporalEvent};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Composes the engine's four collaborators behind one type. Generic over
/// the forecaster so callers can swap in a real model-backed implementation
/// without touching the rest of the engine (`spec.md` §5).
pub struct Orchestrator<F: Forecaster = NaiveForecaster> {
    extractor: TimelineExtractor,
    forecaster: F,
}

impl Orchestrator<NaiveForecaster> {
    /// An orchestrator with default extraction tuning and the trivial
    /// reference forecaster.
    pub fn new() -> Self {
        Self {
            extractor: TimelineExtractor::new(),
            forecaster: NaiveForecaster,
        }
    }
}

impl Default for Orchestrator<NaiveForecaster> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Forecaster> Orchestrator<F> {
    pub fn with_forecaster(extractor: TimelineExtractor, forecaster: F) -> Self {
        Self { extractor, forecaster }
    }

    /// Extracts the timeline from `text` relative to `reference_date`.
    pub fn extract_from_text(&self, text: &str, reference_date: DateTime<Utc>) -> Vec<TemporalEvent> {
        tracing::info!(chars = text.len(), "extracting timeline from text");
        let events = self.extractor.extract_events(text, reference_date);
        tracing::info!(found = events.len(), "timeline extraction complete");
        events
    }

    /// The Allen relation between two events (`spec.md` §4.2).
    pub fn get_relation(&self, a: &TemporalEvent, b: &TemporalEvent) -> AllenRelation {
        causality::get_relation(a, b)
    }

    /// Whether `cause` is a temporally plausible cause of `effect`
    /// (`spec.md` §4.2).
    pub fn analyze_causality(&self, cause: &TemporalEvent, effect: &TemporalEvent) -> bool {
        causality::is_plausible_cause(cause, effect)
    }

    /// Runs `rule` against `target`/`reference` (`spec.md` §4.3).
    pub fn check_compliance(
        &self,
        rule: &impl ValidationRule,
        target: DateTime<Utc>,
        reference: DateTime<Utc>,
    ) -> Result<ComplianceResult> {
        rule.validate(target, reference)
    }

    /// Delegates to the configured forecaster.
    pub fn forecast_series(&self, request: &ForecastRequest) -> Result<ForecastResult> {
        self.forecaster.forecast(request)
    }
}

impl<F: Forecaster + Send + Sync + 'static> Orchestrator<F> {
    /// Async counterpart to [`Self::extract_from_text`]: runs the same
    /// synchronous extraction on a blocking-pool thread so it never stalls
    /// the calling task's executor.
    pub async fn extract_from_text_async(
        self: Arc<Self>,
        text: String,
        reference_date: DateTime<Utc>,
    ) -> Vec<TemporalEvent> {
        tokio::task::spawn_blocking(move || self.extract_from_text(&text, reference_date))
            .await
            .expect("extraction worker task panicked")
    }

    /// Async counterpart to [`Self::forecast_series`].
    pub async fn forecast_series_async(self: Arc<Self>, request: ForecastRequest) -> Result<ForecastResult> {
        tokio::task::spawn_blocking(move || self.forecast_series(&request))
            .await
            .expect("forecast worker task panicked")
    }
}

/// Parses a reference-date string at an API boundary (the CLI, or any other
/// caller handed a bare string rather than a typed `DateTime`). Unlike
/// [`Orchestrator::extract_from_text`], this *can* fail on a naive input:
/// `DateTime<FixedOffset>` is always zone-aware once parsed, but the input
/// string itself may lack an offset entirely, which is exactly the
/// "timezone-naive reference date" rejection `spec.md` §7 describes for the
/// Python prototype's naive/aware `datetime` distinction.
pub fn parse_reference_date(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ChronosError::InvalidReference)
}
