//! Round-robin tournament: every entered strategy plays every other once.
//!
//! Pair `k` (counting `(i, j)` with `i < j` in entry order) is played with
//! seed `base_seed + k`. Results go to a leaderboard, either the SQLite file
//! given with `--db` or an in-memory one that only lives for this run.

use super::{entrant, resolve_chips};
use crate::config::Config;
use crate::error::CliError;
use crate::io_utils::ensure_parent_dir;
use crate::store::{Leaderboard, Standing};
use onecard_engine::engine::Engine;
use std::collections::HashSet;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// All `(i, j)` index pairs with `i < j`, in schedule order.
pub fn round_robin_pairs(n: usize) -> Vec<(usize, usize)> {
    (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .collect()
}

/// Handle the tournament command.
///
/// # Arguments
///
/// * `ais` - Strategy specs; at least two, no duplicates
/// * `seed` - Base seed for the schedule
/// * `chips` - Starting chips for every game
/// * `db` - Optional leaderboard database to update
/// * `config` - Resolved configuration
/// * `out` - Output stream for match results and standings
pub fn handle_tournament_command(
    ais: &[String],
    seed: Option<u64>,
    chips: Option<i64>,
    db: Option<PathBuf>,
    config: &Config,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let entrants: Vec<&str> = ais.iter().map(|s| s.trim()).collect();
    if entrants.len() < 2 {
        return Err(CliError::InvalidInput(
            "a tournament needs at least two strategies".to_string(),
        ));
    }
    let mut seen = HashSet::new();
    for name in &entrants {
        if !seen.insert(*name) {
            return Err(CliError::InvalidInput(format!(
                "strategy entered twice: {}",
                name
            )));
        }
    }
    let base_seed = seed.unwrap_or(config.seed);
    let chips = resolve_chips(chips, config.starting_chips)?;

    // Reject bad specs before any game is played or stored
    for name in &entrants {
        entrant(name, name, 0)?;
    }

    let mut board = match &db {
        Some(path) => {
            ensure_parent_dir(path).map_err(CliError::Storage)?;
            Leaderboard::open(path)?
        }
        None => Leaderboard::open_in_memory()?,
    };
    for name in &entrants {
        board.register(name)?;
    }

    let pairs = round_robin_pairs(entrants.len());
    for (k, &(i, j)) in pairs.iter().enumerate() {
        let pair_seed = base_seed.wrapping_add(k as u64);
        let a = entrant(entrants[i], entrants[i], pair_seed)?;
        let b = entrant(entrants[j], entrants[j], pair_seed.wrapping_add(1))?;
        let result = Engine::new(Some(pair_seed), config.table_rules()).run_game(a, b, chips)?;
        board.record_match(pair_seed, &result)?;

        let [pa, pb] = &result.players;
        writeln!(
            out,
            "Match {}: {} vs {} -> {} ({}, {} rounds, {}/{})",
            k + 1,
            pa.name,
            pb.name,
            result.winner_name().unwrap_or("draw"),
            result.end_reason,
            result.rounds,
            pa.final_chips,
            pb.final_chips
        )?;
        info!(pair = k + 1, seed = pair_seed, winner = ?result.winner_name(), "tournament match finished");
    }

    writeln!(out)?;
    write_standings(out, &board.standings()?)?;
    if let Some(path) = &db {
        writeln!(out, "Leaderboard saved to {}", path.display())?;
    }
    Ok(())
}

pub(crate) fn write_standings(out: &mut dyn Write, standings: &[Standing]) -> std::io::Result<()> {
    writeln!(out, "Standings:")?;
    for (rank, s) in standings.iter().enumerate() {
        writeln!(
            out,
            "{:>3}. {:<24} W{} L{} D{} chips {:+}",
            rank + 1,
            s.algorithm_name,
            s.wins,
            s.losses,
            s.draws,
            s.chips
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn schedule_covers_every_pair_once() {
        assert_eq!(round_robin_pairs(1), vec![]);
        assert_eq!(round_robin_pairs(3), vec![(0, 1), (0, 2), (1, 2)]);
        assert_eq!(round_robin_pairs(6).len(), 15);
    }

    #[test]
    fn rejects_too_few_or_duplicate_entrants() {
        let cfg = Config::default();
        let mut out = Vec::new();
        assert!(matches!(
            handle_tournament_command(&specs(&["call"]), None, None, None, &cfg, &mut out),
            Err(CliError::InvalidInput(_))
        ));
        assert!(matches!(
            handle_tournament_command(&specs(&["call", "call"]), None, None, None, &cfg, &mut out),
            Err(CliError::InvalidInput(_))
        ));
        assert!(matches!(
            handle_tournament_command(&specs(&["call", "nope"]), None, None, None, &cfg, &mut out),
            Err(CliError::InvalidInput(_))
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn folder_finishes_last() {
        let cfg = Config::default();
        let mut out = Vec::new();
        handle_tournament_command(
            &specs(&["call", "baseline", "fold"]),
            Some(3),
            Some(20),
            None,
            &cfg,
            &mut out,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.matches("Match ").count(), 3);
        let last = text.lines().last().unwrap();
        assert!(last.contains("fold"), "{}", text);
        assert!(last.contains("W0 L2 D0"), "{}", text);
    }

    #[test]
    fn db_accumulates_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("boards").join("lb.sqlite");
        let cfg = Config::default();
        for _ in 0..2 {
            let mut out = Vec::new();
            handle_tournament_command(
                &specs(&["call", "fold"]),
                Some(1),
                Some(10),
                Some(db.clone()),
                &cfg,
                &mut out,
            )
            .unwrap();
        }
        let board = Leaderboard::open(&db).unwrap();
        assert_eq!(board.match_count().unwrap(), 2);
        let standings = board.standings().unwrap();
        assert_eq!(standings[0].algorithm_name, "call");
        assert_eq!(standings[0].wins, 2);
        assert_eq!(standings[0].chips, 20);
        assert_eq!(standings[1].chips, -20);
    }
}
