use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cards::Rank;
use crate::errors::GameError;
use crate::player::PlayerAction as A;

pub const SMALL_BLIND: i64 = 1;
pub const BIG_BLIND: i64 = 2;
pub const DEFAULT_MAX_ROUNDS: u32 = 10_000;

/// What happens to the pot when both cards have the same rank.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TiePolicy {
    /// Half to each seat, the odd chip to the big blind
    #[default]
    Split,
    /// Nobody collects; the chips leave the game
    Forfeit,
}

impl std::str::FromStr for TiePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "split" => Ok(TiePolicy::Split),
            "forfeit" => Ok(TiePolicy::Forfeit),
            other => Err(format!("unknown tie policy: {}", other)),
        }
    }
}

/// Table parameters shared by every round of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRules {
    pub small_blind: i64,
    pub big_blind: i64,
    pub tie_policy: TiePolicy,
    /// When true, a call answering a raise hands the action back instead of closing betting
    pub raise_reopens_action: bool,
    /// Slower decisions are folded; `None` disables the check
    pub decision_budget: Option<Duration>,
    pub max_rounds: u32,
}

impl Default for TableRules {
    fn default() -> Self {
        Self {
            small_blind: SMALL_BLIND,
            big_blind: BIG_BLIND,
            tie_policy: TiePolicy::Split,
            raise_reopens_action: true,
            decision_budget: Some(Duration::from_millis(250)),
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    /// Chips actually paid, at most the caller's balance
    Call(i64),
    /// Effective raise after clamping, always positive
    Raise(i64),
}

/// Turns a requested action into the amounts the round engine will move.
///
/// * Calls pay `current_bet`, short if the caller holds less.
/// * Raises are clamped to `min(requested, actor_chips, opponent_chips)`; if that
///   leaves nothing to raise the action is applied as a call.
///
/// # Errors
///
/// [`GameError::InvalidRaise`] when the requested raise is zero or negative.
///
/// # Examples
///
/// ```
/// use onecard_engine::player::PlayerAction;
/// use onecard_engine::rules::{validate_action, ValidatedAction};
///
/// let va = validate_action(PlayerAction::Raise(50), 30, 12, 2).unwrap();
/// assert_eq!(va, ValidatedAction::Raise(12));
///
/// assert!(validate_action(PlayerAction::Raise(0), 30, 12, 2).is_err());
/// ```
pub fn validate_action(
    action: A,
    actor_chips: i64,
    opponent_chips: i64,
    current_bet: i64,
) -> Result<ValidatedAction, GameError> {
    let call_amount = current_bet.clamp(0, actor_chips.max(0));
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Call => Ok(ValidatedAction::Call(call_amount)),
        A::Raise(amount) if amount <= 0 => Err(GameError::InvalidRaise { amount }),
        A::Raise(amount) => {
            let effective = amount.min(actor_chips).min(opponent_chips);
            if effective <= 0 {
                Ok(ValidatedAction::Call(call_amount))
            } else {
                Ok(ValidatedAction::Raise(effective))
            }
        }
    }
}

/// Chips the winner additionally takes from the loser under the two-rule:
/// half (rounded down) of the loser's remaining balance when the winning card is a Two.
pub fn two_rule_bonus(winner_card: Rank, loser_chips: i64) -> i64 {
    if winner_card.is_deuce() && loser_chips > 0 {
        loser_chips / 2
    } else {
        0
    }
}
