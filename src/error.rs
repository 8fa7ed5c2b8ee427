//! Error taxonomy for the temporal reasoning engine.
//!
//! Contract violations at API boundaries surface as [`ChronosError`]. The
//! extractor's best-effort failures (unresolved anchors, unlocatable
//! snippets) are *not* part of this taxonomy; they are logged and silently
//! omitted, never propagated (`spec.md` §7).

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChronosError {
    #[error("timestamp is not timezone-aware: {0}")]
    InvalidTimezone(String),

    #[error("invalid interval: start ({start}) is not strictly before end ({end})")]
    InvalidInterval { start: String, end: String },

    #[error("invalid event configuration: {0}")]
    InvalidEventConfig(String),

    #[error("invalid forecast request: {0}")]
    InvalidForecastRequest(String),

    #[error("reference date must be timezone-aware")]
    InvalidReference,
}

pub type Result<T> = std::result::Result<T, ChronosError>;
