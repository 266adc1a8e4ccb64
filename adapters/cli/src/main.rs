#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a Maze Runner level headlessly.

mod config;
mod runner;
mod script;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{config::FileConfig, script::Script};

/// Plays a maze level from a map file using scripted keyboard input.
#[derive(Debug, Parser)]
#[command(name = "maze-runner", version)]
struct Cli {
    /// Map file with one `x,y=type` record per line.
    map: PathBuf,

    /// TOML file with `[simulation]` and `[runner]` tables.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Input script such as `R40 UR12 -250`.
    #[arg(long, conflicts_with = "script_file")]
    script: Option<String>,

    /// File containing the input script.
    #[arg(long, value_name = "FILE")]
    script_file: Option<PathBuf>,

    /// Milliseconds between ticks; overrides the config file.
    #[arg(long)]
    frame_millis: Option<u64>,

    /// Maximum number of ticks; overrides the config file.
    #[arg(long)]
    max_ticks: Option<u64>,
}

/// Entry point for the Maze Runner command-line interface.
fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    if let Some(frame_millis) = cli.frame_millis {
        config.runner.frame_millis = frame_millis;
    }
    if let Some(max_ticks) = cli.max_ticks {
        config.runner.max_ticks = max_ticks;
    }

    let script = load_script(&cli, config.runner.max_ticks)?;
    tracing::info!(frames = script.len(), "script loaded");

    let (cells, skipped) = runner::read_map(&cli.map)?;
    tracing::info!(cells = cells.len(), skipped, map = %cli.map.display(), "map read");

    let summary = runner::run(cells, config.simulation, config.runner, &script)?;
    println!("{summary}");
    Ok(())
}

fn load_script(cli: &Cli, max_ticks: u64) -> Result<Script> {
    if let Some(text) = &cli.script {
        return Script::parse(text).context("invalid --script");
    }
    if let Some(path) = &cli.script_file {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read script at {}", path.display()))?;
        return Script::parse(&text)
            .with_context(|| format!("invalid script at {}", path.display()));
    }
    Ok(Script::idle(max_ticks))
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
