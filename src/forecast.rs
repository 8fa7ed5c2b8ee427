//! Boundary contract for the forecasting collaborator.
//!
//! The real system's forecaster (`examples/original_source/src/coreason_chronos/forecaster.py`)
//! wraps an Amazon Chronos-T5 model and is explicitly out of scope here; it
//! is an external collaborator, treated as the opaque function
//! `forecast(history, horizon, confidence) -> ForecastResult` (`spec.md`
//! §1). This module keeps only the boundary types and trait so the rest of
//! the engine can depend on a forecaster without depending on any particular
//! model runtime, plus a trivial reference implementation for tests and
//! local use.

use crate::error::Result;
use crate::model::{ForecastRequest, ForecastResult};

pub trait Forecaster {
    fn forecast(&self, request: &ForecastRequest) -> Result<ForecastResult>;
}

/// A last-value random-walk forecaster: not a model, a stand-in that
/// satisfies the [`Forecaster`] contract so the engine is exercisable
/// without a real forecasting backend wired in. Swap in an implementation
/// backed by the real collaborator for production use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NaiveForecaster;

impl Forecaster for NaiveForecaster {
    fn forecast(&self, request: &ForecastRequest) -> Result<ForecastResult> {
        let history = request.history();
        let last = *history.last().expect("ForecastRequest guarantees non-empty history");
        let spread = sample_std_dev(history);

        // Widen the interval as width scales with confidence_level (for the
        // reference implementation only; a real model fits this from the
        // data, not from a fixed z-score table).
        let z = z_score_for(request.confidence_level());

        let n = request.prediction_length();
        let median = vec![last; n];
        let lower_bound = vec![last - z * spread; n];
        let upper_bound = vec![last + z * spread; n];

        Ok(ForecastResult {
            median,
            lower_bound,
            upper_bound,
            confidence_level: request.confidence_level(),
        })
    }
}

fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance =
        values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Rough two-sided z-score approximation for a handful of common confidence
/// levels, falling back to a linear interpolation. Good enough for the
/// reference forecaster; a real model would compute empirical quantiles.
fn z_score_for(confidence_level: f64) -> f64 {
    match confidence_level {
        c if c >= 0.99 => 2.576,
        c if c >= 0.95 => 1.960,
        c if c >= 0.90 => 1.645,
        c if c >= 0.80 => 1.282,
        c => 0.674 + (c - 0.5) * 2.0, // crude linear fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naive_forecaster_produces_matching_lengths() {
        let request = ForecastRequest::new(vec![1.0, 2.0, 3.0, 4.0], 5, 0.9).unwrap();
        let result = NaiveForecaster.forecast(&request).unwrap();
        assert_eq!(result.median.len(), 5);
        assert_eq!(result.lower_bound.len(), 5);
        assert_eq!(result.upper_bound.len(), 5);
        for i in 0..5 {
            assert!(result.lower_bound[i] <= result.median[i]);
            assert!(result.median[i] <= result.upper_bound[i]);
        }
    }

    #[test]
    fn constant_history_has_zero_spread() {
        let request = ForecastRequest::new(vec![5.0, 5.0, 5.0], 3, 0.9).unwrap();
        let result = NaiveForecaster.forecast(&request).unwrap();
        assert_eq!(result.lower_bound, result.upper_bound);
    }
}
