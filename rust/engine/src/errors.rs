use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid rank: {0} (expected 2..=14)")]
    InvalidRank(u8),
    #[error("Invalid raise amount: {amount}, must be positive")]
    InvalidRaise { amount: i64 },
    #[error("Malformed action: {0}")]
    MalformedAction(String),
    #[error("Invalid starting chips: {0}, must be between 1 and i64::MAX / 2")]
    InvalidStartingChips(i64),
    #[error("Stacked deck needs at least one pair")]
    EmptyStackedDeck,
}

/// Failure reported by a strategy instead of a decision.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecisionError {
    #[error("malformed decision: {0}")]
    Malformed(String),
    #[error("strategy failed: {0}")]
    Failed(String),
}

impl From<GameError> for DecisionError {
    fn from(e: GameError) -> Self {
        DecisionError::Malformed(e.to_string())
    }
}
