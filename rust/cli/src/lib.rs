//! # onecard CLI Library
//!
//! Command-line front end for the onecard engine: single games, bulk
//! simulations, round-robin tournaments and a SQLite leaderboard.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the arguments, executes the subcommand and returns the
//! process exit code.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["onecard", "tournament", "--ai", "call", "fold", "baseline"];
//! let code = onecard_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: One game, narrated round by round
//! - `sim`: Many games between two strategies, with optional JSONL round history
//! - `tournament`: Round robin over a list of strategies, optionally stored in SQLite
//! - `leaderboard`: Print stored standings
//! - `cfg`: Display the resolved configuration

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod io_utils;
pub mod logging;
mod macros;
pub mod store;
pub mod ui;

use cli::{Commands, OnecardCli};
use commands::{
    handle_cfg_command, handle_leaderboard_command, handle_play_command, handle_sim_command,
    handle_tournament_command,
};

pub use error::CliError;

/// Main entry point for the CLI application.
///
/// # Arguments
///
/// * `args` - Command-line arguments including the program name
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["onecard", "play", "--a", "call", "--b", "fold", "--chips", "5"];
/// let code = onecard_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match OnecardCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version go to stdout with success
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    write_or_exit!(out, "{}", e);
                    exit_code::SUCCESS
                }
                _ => {
                    write_or_exit!(err, "{}", e);
                    write_or_exit!(err, "Usage: onecard <command> [options]\n");
                    write_or_exit!(err, "Commands:");
                    for c in Commands::NAMES {
                        write_or_exit!(err, "  {}", c);
                    }
                    write_or_exit!(err, "\nFor full help, run: onecard --help");
                    exit_code::ERROR
                }
            };
        }
    };

    logging::init_logging(cli.verbose);

    match dispatch(cli.cmd, out, err) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

fn dispatch(cmd: Commands, out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    if let Commands::Cfg = cmd {
        return handle_cfg_command(out, err);
    }
    let cfg = config::load()?;
    match cmd {
        Commands::Play { a, b, seed, chips } => handle_play_command(&a, &b, seed, chips, &cfg, out),
        Commands::Sim {
            games,
            a,
            b,
            seed,
            chips,
            output,
        } => handle_sim_command(games, &a, &b, seed, chips, output, &cfg, out, err),
        Commands::Tournament {
            ai,
            seed,
            chips,
            db,
        } => handle_tournament_command(&ai, seed, chips, db, &cfg, out),
        Commands::Leaderboard { db, json } => handle_leaderboard_command(&db, json, out),
        Commands::Cfg => handle_cfg_command(out, err),
    }
}
