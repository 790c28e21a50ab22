//! Baseline AI implementation.
//!
//! An agent never sees its own card, only the opponent's. Since the two cards
//! of a round are distinct ranks from 2..=14, the chance of holding the higher
//! card is the share of the other twelve ranks that beat the visible one.
//! The baseline raises with a strong edge, calls when pot odds justify it and
//! folds otherwise.

use onecard_engine::agent::{Observation, Strategy};
use onecard_engine::cards::Rank;
use onecard_engine::errors::DecisionError;
use onecard_engine::player::PlayerAction;

/// Win probability at or above which the baseline raises.
const RAISE_THRESHOLD: f64 = 0.75;

/// Simple baseline AI for testing and comparison.
///
/// # Strategy
///
/// - Win chance ≥ 75%: raise twice the current bet (at least 4)
/// - Otherwise: call when `p_win * (pot + to_call) >= to_call`, else fold
///
/// # Example
///
/// ```rust
/// use onecard_ai::baseline::BaselineAI;
/// use onecard_engine::agent::{Observation, Strategy};
/// use onecard_engine::cards::Rank;
/// use onecard_engine::player::PlayerAction;
///
/// let mut ai = BaselineAI::new();
/// let obs = Observation {
///     opponent_card: Rank::Ace,
///     own_chips: 98,
///     opponent_chips: 99,
///     pot: 3,
///     current_bet: 2,
///     facing_raise: false,
///     round: 1,
/// };
/// assert_eq!(ai.decide_action(&obs).unwrap(), PlayerAction::Fold);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BaselineAI;

impl BaselineAI {
    pub fn new() -> Self {
        Self
    }

    /// Probability of holding the higher card given the opponent's rank.
    pub fn win_probability(opponent_card: Rank) -> f64 {
        let beaten_by = (Rank::Ace.value() - opponent_card.value()) as f64;
        beaten_by / 12.0
    }
}

impl Strategy for BaselineAI {
    fn name(&self) -> &str {
        "BaselineAI"
    }

    fn decide_action(&mut self, obs: &Observation) -> Result<PlayerAction, DecisionError> {
        let p_win = Self::win_probability(obs.opponent_card);
        let to_call = obs.to_call();

        if p_win >= RAISE_THRESHOLD {
            if obs.own_chips > 0 && obs.opponent_chips > 0 {
                return Ok(PlayerAction::Raise(obs.current_bet.saturating_mul(2).max(4)));
            }
            return Ok(PlayerAction::Call);
        }

        let expected = p_win * (obs.pot + to_call) as f64;
        if expected >= to_call as f64 {
            Ok(PlayerAction::Call)
        } else {
            Ok(PlayerAction::Fold)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(opponent_card: Rank, pot: i64, current_bet: i64) -> Observation {
        Observation {
            opponent_card,
            own_chips: 90,
            opponent_chips: 90,
            pot,
            current_bet,
            facing_raise: current_bet > 2,
            round: 1,
        }
    }

    #[test]
    fn win_probability_spans_zero_to_one() {
        assert_eq!(BaselineAI::win_probability(Rank::Ace), 0.0);
        assert_eq!(BaselineAI::win_probability(Rank::Two), 1.0);
        assert!((BaselineAI::win_probability(Rank::Eight) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn raises_against_low_cards() {
        let mut ai = BaselineAI::new();
        assert_eq!(
            ai.decide_action(&obs(Rank::Four, 3, 2)).unwrap(),
            PlayerAction::Raise(4)
        );
        assert_eq!(
            ai.decide_action(&obs(Rank::Two, 30, 10)).unwrap(),
            PlayerAction::Raise(20)
        );
    }

    #[test]
    fn calls_cheap_and_folds_expensive_middling_spots() {
        let mut ai = BaselineAI::new();
        // p_win = 0.5: calling 2 into 3 is worth it
        assert_eq!(
            ai.decide_action(&obs(Rank::Eight, 3, 2)).unwrap(),
            PlayerAction::Call
        );
        // p_win = 1/12: calling 40 into 5 is not
        assert_eq!(
            ai.decide_action(&obs(Rank::King, 5, 40)).unwrap(),
            PlayerAction::Fold
        );
    }

    #[test]
    fn free_call_is_never_folded() {
        let mut ai = BaselineAI::new();
        let mut o = obs(Rank::Ace, 10, 2);
        o.own_chips = 0;
        assert_eq!(ai.decide_action(&o).unwrap(), PlayerAction::Call);
    }
}
