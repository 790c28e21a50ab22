use crate::cards::Rank;
use crate::errors::GameError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Represents a betting decision.
/// The raise amount is whatever the agent asks for; the round engine clamps it.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Forfeit the round; the opponent takes the pot
    Fold,
    /// Pay the current bet
    Call,
    /// Put the given amount into the pot and hand the action over
    Raise(i64),
}

impl FromStr for PlayerAction {
    type Err = GameError;

    /// Accepts `fold`, `call`, `raise:N` and `raise N` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().to_ascii_lowercase();
        match t.as_str() {
            "fold" => return Ok(PlayerAction::Fold),
            "call" => return Ok(PlayerAction::Call),
            _ => {}
        }
        let amount = t
            .strip_prefix("raise")
            .map(|rest| rest.trim_start_matches([':', ' ']).trim())
            .ok_or_else(|| GameError::MalformedAction(s.to_string()))?;
        amount
            .parse::<i64>()
            .map(PlayerAction::Raise)
            .map_err(|_| GameError::MalformedAction(s.to_string()))
    }
}

/// Represents a participant with a display name, a chip balance and the card dealt this round.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    chips: i64,
    card: Option<Rank>,
}

impl Player {
    pub fn new(name: impl Into<String>, chips: i64) -> Self {
        Self {
            name: name.into(),
            chips,
            card: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn chips(&self) -> i64 {
        self.chips
    }
    pub fn card(&self) -> Option<Rank> {
        self.card
    }

    pub fn set_card(&mut self, c: Rank) {
        self.card = Some(c);
    }

    pub fn add_chips(&mut self, amount: i64) {
        self.chips = self.chips.saturating_add(amount);
    }

    /// Pays up to `amount` from the balance and returns what was actually paid.
    pub fn take_chips(&mut self, amount: i64) -> i64 {
        let paid = amount.clamp(0, self.chips.max(0));
        self.chips -= paid;
        paid
    }

    pub fn is_busted(&self) -> bool {
        self.chips <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_actions() {
        assert_eq!("fold".parse::<PlayerAction>(), Ok(PlayerAction::Fold));
        assert_eq!(" CALL ".parse::<PlayerAction>(), Ok(PlayerAction::Call));
        assert_eq!("raise:5".parse::<PlayerAction>(), Ok(PlayerAction::Raise(5)));
        assert_eq!("raise 12".parse::<PlayerAction>(), Ok(PlayerAction::Raise(12)));
        assert_eq!("raise:-3".parse::<PlayerAction>(), Ok(PlayerAction::Raise(-3)));
    }

    #[test]
    fn rejects_unknown_actions() {
        assert!(matches!(
            "check".parse::<PlayerAction>(),
            Err(GameError::MalformedAction(_))
        ));
        assert!("raise".parse::<PlayerAction>().is_err());
        assert!("raise:lots".parse::<PlayerAction>().is_err());
    }

    #[test]
    fn take_chips_never_overdraws() {
        let mut p = Player::new("p", 3);
        assert_eq!(p.take_chips(2), 2);
        assert_eq!(p.take_chips(5), 1);
        assert_eq!(p.chips(), 0);
        assert!(p.is_busted());
        assert_eq!(p.take_chips(-4), 0);
    }
}
