//! Command-line interface for strictly_pairs.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Pairs - memory-matching card game
#[derive(Parser, Debug)]
#[command(name = "strictly_pairs")]
#[command(about = "Memory-matching card game with an explicit session state machine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Path to game config file
        #[arg(short, long, default_value = "strictly_pairs.toml")]
        config: PathBuf,

        /// Shuffle seed, overriding the config file
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Let the memory player finish a game headlessly and print the result
    Autoplay {
        /// Path to game config file
        #[arg(short, long, default_value = "strictly_pairs.toml")]
        config: PathBuf,

        /// Shuffle seed, overriding the config file
        #[arg(long)]
        seed: Option<u64>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Path to game config file
        #[arg(short, long, default_value = "strictly_pairs.toml")]
        config: PathBuf,
    },
}
