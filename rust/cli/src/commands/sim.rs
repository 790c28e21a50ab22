//! Simulation command: many games between the same two strategies.
//!
//! Game `g` uses seed `base_seed + g` and the strategies swap seats every game
//! so neither side keeps the first small blind. With `--output` every round is
//! appended to a JSONL history file.

use super::{entrant, resolve_chips, seat_names};
use crate::config::Config;
use crate::error::CliError;
use crate::ui;
use onecard_engine::engine::Engine;
use onecard_engine::game::EndReason;
use onecard_engine::logger::{ActionKind, RoundLogger, RoundRecord};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct SimStats {
    games: u32,
    /// Wins indexed by entrant (not seat)
    wins: [u32; 2],
    draws: u32,
    rounds: u64,
    two_rule_transfers: u32,
    forced_folds: u32,
    round_limit_games: u32,
}

impl SimStats {
    fn observe_round(&mut self, record: &RoundRecord) {
        if record.two_rule_transfer > 0 {
            self.two_rule_transfers += 1;
        }
        self.forced_folds += record
            .actions
            .iter()
            .filter(|a| matches!(a.action, ActionKind::Fold { forced: Some(_) }))
            .count() as u32;
    }

    fn avg_rounds(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.rounds as f64 / self.games as f64
        }
    }
}

/// Handle the sim command.
///
/// # Arguments
///
/// * `games` - Number of games to play (at least 1)
/// * `ai_a`, `ai_b` - Strategy specs
/// * `seed` - Base seed; game `g` uses `seed + g`
/// * `chips` - Starting chips per player
/// * `output` - Optional JSONL round history path
/// * `config` - Resolved configuration
/// * `out` - Output stream for the summary
/// * `err` - Output stream for error messages
#[allow(clippy::too_many_arguments)]
pub fn handle_sim_command(
    games: u32,
    ai_a: &str,
    ai_b: &str,
    seed: Option<u64>,
    chips: Option<i64>,
    output: Option<PathBuf>,
    config: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if games == 0 {
        ui::write_error(err, "games must be >= 1")?;
        return Err(CliError::InvalidInput("games must be >= 1".to_string()));
    }
    let base_seed = seed.unwrap_or(config.seed);
    let chips = resolve_chips(chips, config.starting_chips)?;
    let names = seat_names(ai_a, ai_b);
    let specs = [ai_a, ai_b];

    let mut logger = match &output {
        Some(path) => Some(RoundLogger::create(path)?),
        None => None,
    };

    let mut stats = SimStats::default();
    let mut logged_rounds = 0u64;
    for g in 0..games {
        let game_seed = base_seed.wrapping_add(g as u64);
        // Entrant order per seat: even games keep a in seat 0
        let order = if g % 2 == 0 { [0, 1] } else { [1, 0] };
        let seat_0 = entrant(&names[order[0]], specs[order[0]], game_seed)?;
        let seat_1 = entrant(&names[order[1]], specs[order[1]], game_seed.wrapping_add(1))?;
        let players = [names[order[0]].clone(), names[order[1]].clone()];

        let engine = Engine::new(Some(game_seed), config.table_rules());
        let mut write_err = None;
        let result = engine.run_game_with(seat_0, seat_1, chips, |record| {
            stats.observe_round(record);
            if let Some(logger) = logger.as_mut()
                && write_err.is_none()
            {
                match logger.write(g + 1, Some(game_seed), players.clone(), record) {
                    Ok(_) => logged_rounds += 1,
                    Err(e) => write_err = Some(e),
                }
            }
        })?;
        if let Some(e) = write_err {
            ui::write_error(err, &format!("Failed to write round history: {}", e))?;
            return Err(e.into());
        }

        stats.games += 1;
        stats.rounds += result.rounds as u64;
        if result.end_reason == EndReason::RoundLimit {
            stats.round_limit_games += 1;
        }
        match result.winner_seat {
            Some(seat) => stats.wins[order[seat]] += 1,
            None => stats.draws += 1,
        }
        info!(game = g + 1, seed = game_seed, winner = ?result.winner_name(), "sim game finished");
    }
    if let Some(logger) = logger.as_mut() {
        logger.flush()?;
    }
    if stats.round_limit_games > 0 {
        ui::display_warning(
            err,
            &format!(
                "{} game(s) stopped at the round limit of {}",
                stats.round_limit_games, config.max_rounds
            ),
        )?;
    }

    writeln!(
        out,
        "Simulated {} games: {} vs {} (base seed {})",
        stats.games, names[0], names[1], base_seed
    )?;
    writeln!(out, "{}: {} wins", names[0], stats.wins[0])?;
    writeln!(out, "{}: {} wins", names[1], stats.wins[1])?;
    writeln!(out, "draws: {}", stats.draws)?;
    writeln!(
        out,
        "rounds: {} total, {:.1} avg",
        stats.rounds,
        stats.avg_rounds()
    )?;
    writeln!(out, "two-rule transfers: {}", stats.two_rule_transfers)?;
    writeln!(out, "forced folds: {}", stats.forced_folds)?;
    if let Some(path) = &output {
        writeln!(
            out,
            "Round history: {} ({} rounds)",
            path.display(),
            logged_rounds
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(games: u32, a: &str, b: &str, output: Option<PathBuf>) -> (Result<(), CliError>, String) {
        let cfg = Config::default();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let res = handle_sim_command(games, a, b, Some(5), Some(30), output, &cfg, &mut out, &mut err);
        (res, String::from_utf8(out).unwrap())
    }

    #[test]
    fn zero_games_is_rejected() {
        let (res, out) = run(0, "call", "fold", None);
        assert!(matches!(res, Err(CliError::InvalidInput(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn folder_loses_every_game() {
        let (res, out) = run(4, "call", "fold", None);
        res.unwrap();
        assert!(out.contains("call: 4 wins\n"), "{}", out);
        assert!(out.contains("fold: 0 wins\n"));
        assert!(out.contains("draws: 0\n"));
    }

    #[test]
    fn round_history_has_one_line_per_round() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("rounds.jsonl");
        let (res, out) = run(3, "baseline", "random", Some(path.clone()));
        res.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert!(!lines.is_empty());
        assert!(out.contains(&format!("({} rounds)", lines.len())));

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["game"], 1);
        assert_eq!(first["seed"], 5);
        assert_eq!(first["round"], 1);
        let last: serde_json::Value = serde_json::from_str(lines[lines.len() - 1]).unwrap();
        assert_eq!(last["game"], 3);
        assert_eq!(last["seed"], 7);
    }

    #[test]
    fn round_limit_is_reported_on_stderr() {
        let cfg = Config {
            max_rounds: 6,
            ..Config::default()
        };
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_sim_command(2, "fold", "fold", Some(1), None, None, &cfg, &mut out, &mut err)
            .unwrap();
        let out = String::from_utf8(out).unwrap();
        let err = String::from_utf8(err).unwrap();
        assert!(out.contains("rounds: 12 total, 6.0 avg\n"), "{}", out);
        assert!(err.contains("WARNING: 2 game(s) stopped at the round limit of 6"));
    }

    #[test]
    fn stats_count_forced_folds() {
        let (res, out) = run(1, "script:check", "call", None);
        res.unwrap();
        assert!(!out.contains("forced folds: 0\n"), "{}", out);
        assert!(out.contains("call: 1 wins\n"));
    }
}
