//! Command-line surface, parsed with clap derive.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "onecard",
    version,
    about = "Heads-up single-card poker: strategy matches, tournaments and leaderboards"
)]
pub struct OnecardCli {
    /// Raise log verbosity (-v debug, -vv trace); overrides RUST_LOG
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play one game and print every round
    Play {
        /// Strategy in seat 1 (e.g. baseline, random, raise:20, script:call,fold)
        #[arg(long, default_value = "baseline")]
        a: String,
        /// Strategy in seat 2
        #[arg(long, default_value = "random")]
        b: String,
        #[arg(long)]
        seed: Option<u64>,
        /// Starting chips per player
        #[arg(long)]
        chips: Option<i64>,
    },
    /// Run many games between two strategies and summarise the results
    Sim {
        #[arg(long, default_value_t = 100)]
        games: u32,
        #[arg(long, default_value = "baseline")]
        a: String,
        #[arg(long, default_value = "random")]
        b: String,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        chips: Option<i64>,
        /// Write every round as a JSON line to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Round robin: every strategy plays every other once
    Tournament {
        /// Strategies to enter (`--ai call fold baseline` or repeated `--ai`)
        #[arg(long, num_args = 1.., required = true)]
        ai: Vec<String>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        chips: Option<i64>,
        /// Record results in this SQLite leaderboard
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Show the standings stored in a leaderboard database
    Leaderboard {
        #[arg(long)]
        db: PathBuf,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

impl Commands {
    pub const NAMES: &'static [&'static str] = &["play", "sim", "tournament", "leaderboard", "cfg"];
}
