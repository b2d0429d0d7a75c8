//! Strictly Pairs - Unified CLI
//!
//! Play in the terminal, or watch the memory player finish a game.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use strictly_pairs::{GameConfig, MemoryPlayer, autoplay, run_tui};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { config, seed } => {
            let config = load_config(&config, seed)?;
            run_tui(config).await
        }
        Command::Autoplay { config, seed, json } => {
            init_stderr_tracing();
            let config = load_config(&config, seed)?;
            run_autoplay(&config, json)
        }
        Command::Config { config } => {
            init_stderr_tracing();
            let config = load_config(&config, None)?;
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn init_stderr_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[instrument(skip(path), fields(path = %path.display()))]
fn load_config(path: &Path, seed: Option<u64>) -> Result<GameConfig> {
    let config = GameConfig::load_or_default(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    Ok(config.with_seed(seed))
}

#[instrument(skip(config))]
fn run_autoplay(config: &GameConfig, json: bool) -> Result<()> {
    let mut player = MemoryPlayer::new("Memory");
    let report = autoplay(config, &mut player);
    info!(selections = report.selections, "Autoplay report ready");

    if json {
        let text = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
        println!("{}", text);
        return Ok(());
    }

    match report.summary {
        Some(summary) => println!("{} finished: {}", report.player, summary),
        None => println!(
            "{} stopped after {} selections with {} of {} cards matched",
            report.player,
            report.selections,
            report.snapshot.matched_count,
            report.snapshot.total_cards
        ),
    }
    Ok(())
}
