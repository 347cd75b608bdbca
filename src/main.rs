//! Main entry point for the gridline backtest driver
//!
//! Loads an engine configuration and a chronological game schedule, drives a
//! full backtest, and prints the evaluation report plus the final rating
//! table.

use anyhow::Result;
use clap::Parser;
use gridline::backtest::{load_schedule, BacktestRunner};
use gridline::config::EngineConfig;
use gridline::eval::DEFAULT_CALIBRATION_BINS;
use std::path::PathBuf;
use tracing::info;

/// Gridline - team rating engine and win-probability backtesting
#[derive(Parser)]
#[command(
    name = "gridline",
    version,
    about = "Backtest a team rating model over a historical game schedule",
    long_about = "Gridline replays a chronological game schedule through an Elo-style \
                 rating engine with pluggable situational adjustments (rest/travel, \
                 weather, quarterback form, turnovers, red-zone and third-down \
                 efficiency) and scores the resulting win probabilities with proper \
                 scoring rules and calibration metrics."
)]
struct Args {
    /// Schedule file (JSON array of game records)
    #[arg(value_name = "SCHEDULE")]
    schedule: PathBuf,

    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    log_level: String,

    /// Calibration bin count
    #[arg(
        short,
        long,
        value_name = "N",
        default_value_t = DEFAULT_CALIBRATION_BINS,
        help = "Number of calibration bins in the report"
    )]
    bins: usize,

    /// Emit the report as JSON instead of text
    #[arg(long, help = "Print the evaluation report as JSON")]
    json: bool,

    /// Dry run mode (validate config and schedule, then exit)
    #[arg(long, help = "Validate configuration and schedule and exit")]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level)?;

    let config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::from_env()?,
    };

    let games = load_schedule(&args.schedule)?;
    info!(games = games.len(), "loaded schedule");

    if args.dry_run {
        println!(
            "Configuration and schedule valid: {} games across seasons {:?}-{:?}",
            games.len(),
            games.first().map(|g| g.season),
            games.last().map(|g| g.season)
        );
        return Ok(());
    }

    let mut runner = BacktestRunner::with_standard_sources(&config)?;
    runner.run(&games)?;

    let report = runner.report(args.bins)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);

        println!("final ratings:");
        for entry in runner.store().snapshot().iter().take(10) {
            println!(
                "  {:<4} {:>7.1}  ({} games)",
                entry.team, entry.rating, entry.games_played
            );
        }
        if runner.skipped_games() > 0 {
            println!("skipped games: {}", runner.skipped_games());
        }
    }

    Ok(())
}
