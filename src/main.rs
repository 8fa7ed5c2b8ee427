mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use temporal_engine::compliance::MaxDelayRule;
use temporal_engine::facade::{parse_reference_date, Orchestrator};
use temporal_engine::model::ForecastRequest;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let orchestrator = Orchestrator::new();

    match cli.command {
        Commands::Extract { text, reference } => {
            let reference = parse_reference_date(&reference).context("invalid reference date")?;
            let events = orchestrator.extract_from_text(&text, reference);
            print_json(&events)
        }

        Commands::Forecast {
            history,
            horizon,
            confidence,
        } => {
            let request = ForecastRequest::new(history, horizon, confidence)
                .context("invalid forecast request")?;
            let result = orchestrator
                .forecast_series(&request)
                .context("forecast failed")?;
            print_json(&result)
        }

        Commands::Validate {
            target,
            reference,
            max_delay_seconds,
        } => {
            let target = parse_reference_date(&target).context("invalid target date")?;
            let reference = parse_reference_date(&reference).context("invalid reference date")?;
            let rule = MaxDelayRule::new(chrono::Duration::seconds(max_delay_seconds))
                .context("invalid max_delay")?;
            let result = orchestrator
                .check_compliance(&rule, target, reference)
                .context("compliance check failed")?;
            print_json(&result)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize result")?;
    println!("{json}");
    Ok(())
}
