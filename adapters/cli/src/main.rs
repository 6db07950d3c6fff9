#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Garden Guardian headlessly.

mod config;
mod high_score;
mod logging;
mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use self::config::{FileConfig, Mode, RunConfig};

/// Runs the garden simulation without a window and prints a JSON summary.
#[derive(Debug, Parser)]
#[command(name = "garden-guardian", author, version, about, long_about = None)]
struct Args {
    /// TOML file providing defaults for the options below.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Seed for every random stream in the world.
    #[arg(long)]
    seed: Option<u64>,
    /// Number of frames to simulate.
    #[arg(long)]
    ticks: Option<u32>,
    /// Length of one frame in milliseconds.
    #[arg(long)]
    frame_ms: Option<u64>,
    /// How much of the play is handed to the AI.
    #[arg(long, value_enum)]
    ai_mode: Option<Mode>,
    /// File holding the best score across runs.
    #[arg(long)]
    high_score: Option<PathBuf>,
    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn overrides(&self) -> FileConfig {
        FileConfig {
            seed: self.seed,
            ticks: self.ticks,
            frame_ms: self.frame_ms,
            ai_mode: self.ai_mode,
            high_score_path: self.high_score.clone(),
        }
    }
}

/// Entry point for the Garden Guardian command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let config = RunConfig::resolve(file, args.overrides())?;

    let stored = match &config.high_score_path {
        Some(path) => high_score::load(path)?,
        None => 0,
    };

    let summary = session::run(&config, stored);

    if let Some(path) = &config.high_score_path {
        if high_score::record(path, summary.high_score)? {
            log::info!("new high score {} saved", summary.high_score);
        }
    }

    let json = serde_json::to_string_pretty(&summary).context("failed to encode run summary")?;
    println!("{json}");
    Ok(())
}
