//! Strategies that ignore the table and always do the same thing.

use onecard_engine::agent::{Observation, Strategy};
use onecard_engine::errors::DecisionError;
use onecard_engine::player::PlayerAction;

pub const DEFAULT_RAISE: i64 = 10;

#[derive(Debug, Clone, Copy, Default)]
pub struct CallingAI;

impl Strategy for CallingAI {
    fn name(&self) -> &str {
        "CallingAI"
    }

    fn decide_action(&mut self, _obs: &Observation) -> Result<PlayerAction, DecisionError> {
        Ok(PlayerAction::Call)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FoldingAI;

impl Strategy for FoldingAI {
    fn name(&self) -> &str {
        "FoldingAI"
    }

    fn decide_action(&mut self, _obs: &Observation) -> Result<PlayerAction, DecisionError> {
        Ok(PlayerAction::Fold)
    }
}

/// Raises the same amount every turn. The engine clamps it to the smaller stack.
#[derive(Debug, Clone, Copy)]
pub struct RaisingAI {
    amount: i64,
}

impl RaisingAI {
    pub fn new(amount: i64) -> Self {
        Self { amount }
    }
}

impl Strategy for RaisingAI {
    fn name(&self) -> &str {
        "RaisingAI"
    }

    fn decide_action(&mut self, _obs: &Observation) -> Result<PlayerAction, DecisionError> {
        Ok(PlayerAction::Raise(self.amount))
    }
}
