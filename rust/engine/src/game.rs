use serde::{Deserialize, Serialize};
use tracing::info;

use crate::agent::Agent;
use crate::deck::Dealer;
use crate::logger::RoundRecord;
use crate::round::play_round;
use crate::rules::TableRules;

/// Blind assignment and round counter for a game in progress.
/// The small-blind role moves between seats; the agents themselves never move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    /// Seat posting the small blind next round (0 or 1)
    small_blind: usize,
    /// Rounds completed so far
    rounds_played: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl GameState {
    pub fn new(small_blind: usize) -> Self {
        Self {
            small_blind: small_blind.min(1),
            rounds_played: 0,
        }
    }

    pub fn small_blind(&self) -> usize {
        self.small_blind
    }
    pub fn big_blind(&self) -> usize {
        1 - self.small_blind
    }
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn rotate_blinds(&mut self) {
        self.small_blind = 1 - self.small_blind;
    }

    fn finish_round(&mut self) {
        self.rounds_played += 1;
        self.rotate_blinds();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// A balance reached zero or below
    Elimination,
    /// The round limit was hit with both agents still holding chips
    RoundLimit,
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndReason::Elimination => write!(f, "elimination"),
            EndReason::RoundLimit => write!(f, "round_limit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub name: String,
    pub strategy: String,
    pub starting_chips: i64,
    pub final_chips: i64,
}

impl PlayerSummary {
    pub fn chip_delta(&self) -> i64 {
        self.final_chips - self.starting_chips
    }
}

/// What the scheduler gets back from a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// Summaries by seat
    pub players: [PlayerSummary; 2],
    /// Winning seat; `None` is a draw
    pub winner_seat: Option<usize>,
    pub rounds: u32,
    pub end_reason: EndReason,
}

impl GameResult {
    pub fn winner_name(&self) -> Option<&str> {
        self.winner_seat.map(|s| self.players[s].name.as_str())
    }
    pub fn is_draw(&self) -> bool {
        self.winner_seat.is_none()
    }
}

/// Plays rounds between two agents until one is eliminated.
pub struct Game {
    agents: [Agent; 2],
    dealer: Box<dyn Dealer>,
    rules: TableRules,
    state: GameState,
    starting_chips: [i64; 2],
}

impl Game {
    pub fn new(agents: [Agent; 2], dealer: Box<dyn Dealer>, rules: TableRules) -> Self {
        let starting_chips = [agents[0].player().chips(), agents[1].player().chips()];
        Self {
            agents,
            dealer,
            rules,
            state: GameState::default(),
            starting_chips,
        }
    }

    pub fn agents(&self) -> &[Agent; 2] {
        &self.agents
    }
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_over(&self) -> bool {
        self.agents.iter().any(|a| a.player().is_busted())
            || self.state.rounds_played >= self.rules.max_rounds
    }

    /// Deals and plays the next round, then hands the small blind to the other seat.
    pub fn play_round(&mut self) -> RoundRecord {
        let cards = self.dealer.deal_pair();
        let record = play_round(
            &mut self.agents,
            self.state.small_blind,
            cards,
            &self.rules,
            self.state.rounds_played + 1,
        );
        self.state.finish_round();
        record
    }

    pub fn run(&mut self) -> GameResult {
        self.run_with(|_| {})
    }

    /// Runs to completion, passing every round record to `observer`.
    pub fn run_with<F>(&mut self, mut observer: F) -> GameResult
    where
        F: FnMut(&RoundRecord),
    {
        while !self.is_over() {
            let record = self.play_round();
            observer(&record);
        }
        let result = self.result();
        info!(
            rounds = result.rounds,
            winner = result.winner_name().unwrap_or("draw"),
            end = ?result.end_reason,
            chips = ?[result.players[0].final_chips, result.players[1].final_chips],
            "game complete"
        );
        result
    }

    /// Higher remaining chips wins; equal balances are a draw.
    pub fn result(&self) -> GameResult {
        let chips = [
            self.agents[0].player().chips(),
            self.agents[1].player().chips(),
        ];
        let winner_seat = match chips[0].cmp(&chips[1]) {
            std::cmp::Ordering::Greater => Some(0),
            std::cmp::Ordering::Less => Some(1),
            std::cmp::Ordering::Equal => None,
        };
        let end_reason = if self.agents.iter().any(|a| a.player().is_busted()) {
            EndReason::Elimination
        } else {
            EndReason::RoundLimit
        };
        let summary = |seat: usize| PlayerSummary {
            name: self.agents[seat].name().to_string(),
            strategy: self.agents[seat].strategy_name().to_string(),
            starting_chips: self.starting_chips[seat],
            final_chips: chips[seat],
        };
        GameResult {
            players: [summary(0), summary(1)],
            winner_seat,
            rounds: self.state.rounds_played,
            end_reason,
        }
    }
}
