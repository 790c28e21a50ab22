use serde::{Deserialize, Serialize};

use crate::agent::ForcedFold;
use crate::cards::Rank;

/// What a single turn did to the table.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionKind {
    Fold {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        forced: Option<ForcedFold>,
    },
    Call {
        paid: i64,
    },
    Raise {
        requested: i64,
        paid: i64,
    },
}

/// Records a single turn in the betting loop.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Seat index (0 or 1)
    pub seat: usize,
    pub action: ActionKind,
    /// Pot size after the action
    pub pot: i64,
}

/// How the round was decided.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoundEnd {
    Fold { folder: usize, winner: usize },
    Showdown { winner: usize },
    Tie,
}

impl RoundEnd {
    pub fn winner(&self) -> Option<usize> {
        match *self {
            RoundEnd::Fold { winner, .. } | RoundEnd::Showdown { winner } => Some(winner),
            RoundEnd::Tie => None,
        }
    }
}

/// Complete record of one round. Serialized to JSONL for round history.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// 1-based round number within the game
    pub round: u32,
    /// Seat that posted the small blind
    pub small_blind: usize,
    /// Cards by seat
    pub cards: [Rank; 2],
    pub actions: Vec<ActionRecord>,
    /// Pot at the end of betting, before disbursement
    pub pot: i64,
    pub end: RoundEnd,
    /// Extra chips moved loser → winner by the two-rule
    pub two_rule_transfer: i64,
    /// Balances by seat after disbursement
    pub chips_after: [i64; 2],
}

/// Wrapper written to the history file: adds identifiers and a timestamp.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundLogEntry {
    /// Unique identifier for this round (format: YYYYMMDD-NNNNNN)
    pub round_id: String,
    /// Game index within the run
    pub game: u32,
    /// RNG seed of the game (enables deterministic replay)
    pub seed: Option<u64>,
    /// Names by seat
    pub players: [String; 2],
    #[serde(flatten)]
    pub record: RoundRecord,
    /// Timestamp when the round was written (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

pub fn format_round_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct RoundLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl RoundLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_round_id(&self.date, self.seq)
    }

    /// Writes one round as a JSON line, assigning the next id and a timestamp.
    pub fn write(
        &mut self,
        game: u32,
        seed: Option<u64>,
        players: [String; 2],
        record: &RoundRecord,
    ) -> std::io::Result<RoundLogEntry> {
        let entry = RoundLogEntry {
            round_id: self.next_id(),
            game,
            seed,
            players,
            record: record.clone(),
            ts: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
        };
        let line = serde_json::to_string(&entry).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
        }
        Ok(entry)
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        match &mut self.writer {
            Some(w) => w.flush(),
            None => Ok(()),
        }
    }
}
