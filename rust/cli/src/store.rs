//! SQLite leaderboard: cumulative standings per strategy plus one row per match.

use chrono::{SecondsFormat, Utc};
use onecard_engine::game::GameResult;
use rusqlite::{Connection, params};
use serde::Serialize;
use std::path::Path;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS leaderboard (
    id INTEGER PRIMARY KEY,
    algorithm_name TEXT NOT NULL UNIQUE,
    wins INTEGER NOT NULL DEFAULT 0,
    losses INTEGER NOT NULL DEFAULT 0,
    draws INTEGER NOT NULL DEFAULT 0,
    chips INTEGER NOT NULL DEFAULT 0
);
CREATE TABLE IF NOT EXISTS matches (
    id INTEGER PRIMARY KEY,
    player_a TEXT NOT NULL,
    player_b TEXT NOT NULL,
    seed INTEGER NOT NULL,
    winner TEXT,
    rounds INTEGER NOT NULL,
    end_reason TEXT NOT NULL,
    chips_a INTEGER NOT NULL,
    chips_b INTEGER NOT NULL,
    played_at TEXT NOT NULL
);
";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub algorithm_name: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Sum of chip deltas over all recorded matches
    pub chips: i64,
}

#[derive(Debug)]
pub struct Leaderboard {
    conn: Connection,
}

impl Leaderboard {
    pub fn open<P: AsRef<Path>>(path: P) -> rusqlite::Result<Self> {
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> rusqlite::Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> rusqlite::Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Adds a strategy with zero counts; existing rows are left alone.
    pub fn register(&self, name: &str) -> rusqlite::Result<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO leaderboard (algorithm_name) VALUES (?1)",
            params![name],
        )?;
        Ok(())
    }

    /// Stores one finished game and updates both players' standings atomically.
    pub fn record_match(&mut self, seed: u64, result: &GameResult) -> rusqlite::Result<()> {
        let tx = self.conn.transaction()?;
        let [a, b] = &result.players;
        tx.execute(
            "INSERT INTO matches (player_a, player_b, seed, winner, rounds, end_reason, chips_a, chips_b, played_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                a.name,
                b.name,
                seed as i64,
                result.winner_name(),
                result.rounds,
                result.end_reason.to_string(),
                a.final_chips,
                b.final_chips,
                Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            ],
        )?;
        for (seat, player) in result.players.iter().enumerate() {
            let (win, loss, draw) = match result.winner_seat {
                None => (0, 0, 1),
                Some(w) if w == seat => (1, 0, 0),
                Some(_) => (0, 1, 0),
            };
            tx.execute(
                "INSERT INTO leaderboard (algorithm_name, wins, losses, draws, chips)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(algorithm_name) DO UPDATE SET
                    wins = wins + excluded.wins,
                    losses = losses + excluded.losses,
                    draws = draws + excluded.draws,
                    chips = chips + excluded.chips",
                params![player.name, win, loss, draw, player.chip_delta()],
            )?;
        }
        tx.commit()
    }

    /// Standings ordered by wins, then chips, both descending.
    pub fn standings(&self) -> rusqlite::Result<Vec<Standing>> {
        let mut stmt = self.conn.prepare(
            "SELECT algorithm_name, wins, losses, draws, chips FROM leaderboard
             ORDER BY wins DESC, chips DESC, algorithm_name ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Standing {
                algorithm_name: row.get(0)?,
                wins: row.get(1)?,
                losses: row.get(2)?,
                draws: row.get(3)?,
                chips: row.get(4)?,
            })
        })?;
        rows.collect()
    }

    pub fn match_count(&self) -> rusqlite::Result<u64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM matches", [], |row| row.get::<_, i64>(0))
            .map(|n| n as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onecard_engine::game::{EndReason, PlayerSummary};

    fn result(a: (&str, i64), b: (&str, i64), winner_seat: Option<usize>) -> GameResult {
        let summary = |(name, chips): (&str, i64)| PlayerSummary {
            name: name.to_string(),
            strategy: "test".to_string(),
            starting_chips: 100,
            final_chips: chips,
        };
        GameResult {
            players: [summary(a), summary(b)],
            winner_seat,
            rounds: 12,
            end_reason: if winner_seat.is_some() {
                EndReason::Elimination
            } else {
                EndReason::RoundLimit
            },
        }
    }

    #[test]
    fn records_wins_losses_and_chip_deltas() {
        let mut lb = Leaderboard::open_in_memory().unwrap();
        lb.record_match(1, &result(("call", 200), ("fold", 0), Some(0)))
            .unwrap();
        lb.record_match(2, &result(("call", 0), ("random", 200), Some(1)))
            .unwrap();
        lb.record_match(3, &result(("fold", 100), ("random", 100), None))
            .unwrap();

        let standings = lb.standings().unwrap();
        let names: Vec<_> = standings.iter().map(|s| s.algorithm_name.as_str()).collect();
        // call and random both have one win; random's chips (+100) beat call's (0)
        assert_eq!(names, vec!["random", "call", "fold"]);

        let fold = &standings[2];
        assert_eq!((fold.wins, fold.losses, fold.draws), (0, 1, 1));
        assert_eq!(fold.chips, -100);
        assert_eq!(lb.match_count().unwrap(), 3);
    }

    #[test]
    fn register_is_idempotent() {
        let mut lb = Leaderboard::open_in_memory().unwrap();
        lb.register("baseline").unwrap();
        lb.record_match(1, &result(("baseline", 150), ("call", 50), Some(0)))
            .unwrap();
        lb.register("baseline").unwrap();

        let standings = lb.standings().unwrap();
        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].algorithm_name, "baseline");
        assert_eq!(standings[0].wins, 1);
        assert_eq!(standings[0].chips, 50);
    }

    #[test]
    fn reopening_a_file_keeps_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.sqlite");
        {
            let mut lb = Leaderboard::open(&path).unwrap();
            lb.record_match(7, &result(("a", 110), ("b", 90), Some(0)))
                .unwrap();
        }
        let lb = Leaderboard::open(&path).unwrap();
        assert_eq!(lb.match_count().unwrap(), 1);
        assert_eq!(lb.standings().unwrap()[0].algorithm_name, "a");
    }
}
