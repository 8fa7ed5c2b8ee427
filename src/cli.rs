//! Argument parsing for the command-line façade (`spec.md` §6). Thin,
//! built over clap, mirroring the teacher's `Cli`/`Commands` split in
//! `src/cli.rs`: same shape, new command set.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Temporal reasoning over narrative text", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract a timeline of events from narrative text.
    Extract {
        /// Narrative text to mine for events.
        text: String,
        /// Reference date, RFC 3339 with an explicit offset (e.g. `2024-01-01T00:00:00Z`).
        #[arg(long)]
        reference: String,
    },
    /// Forecast a numeric series with the configured reference forecaster.
    Forecast {
        /// Comma-separated history values, e.g. `1.0,2.0,3.0`.
        #[arg(long, value_delimiter = ',')]
        history: Vec<f64>,
        /// Number of future points to predict.
        #[arg(long)]
        horizon: usize,
        /// Confidence level in (0, 1).
        #[arg(long, default_value_t = 0.9)]
        confidence: f64,
    },
    /// Evaluate deadline compliance of a target instant against a reference.
    Validate {
        /// Target instant, RFC 3339 with an explicit offset.
        #[arg(long)]
        target: String,
        /// Reference (deadline baseline) instant, RFC 3339 with an explicit offset.
        #[arg(long)]
        reference: String,
        /// Maximum allowed delay, in seconds.
        #[arg(long)]
        max_delay_seconds: i64,
    },
}
