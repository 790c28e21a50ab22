use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::GameError;

/// Face value of a card from Two through Ace.
/// The deck is un-suited, so a rank is the whole card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Rank {
    /// Rank 2, the lowest card and trigger of the two-rule
    Two = 2,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack (11)
    Jack,
    /// Queen (12)
    Queen,
    /// King (13)
    King,
    /// Ace (14), always high
    Ace,
}

impl Rank {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn is_deuce(self) -> bool {
        self == Rank::Two
    }
}

impl TryFrom<u8> for Rank {
    type Error = GameError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Ok(match v {
            2 => Rank::Two,
            3 => Rank::Three,
            4 => Rank::Four,
            5 => Rank::Five,
            6 => Rank::Six,
            7 => Rank::Seven,
            8 => Rank::Eight,
            9 => Rank::Nine,
            10 => Rank::Ten,
            11 => Rank::Jack,
            12 => Rank::Queen,
            13 => Rank::King,
            14 => Rank::Ace,
            other => return Err(GameError::InvalidRank(other)),
        })
    }
}

impl From<Rank> for u8 {
    fn from(r: Rank) -> u8 {
        r.value()
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Jack => write!(f, "J"),
            Rank::Queen => write!(f, "Q"),
            Rank::King => write!(f, "K"),
            Rank::Ace => write!(f, "A"),
            other => write!(f, "{}", other.value()),
        }
    }
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ]
}
