//! Replays a fixed action list, looping when it runs out.
//!
//! Tokens are parsed when they are played, not when the script is built, so a
//! bad token surfaces as a malformed decision at the table (and the engine
//! folds for it) rather than as a construction error.

use onecard_engine::agent::{Observation, Strategy};
use onecard_engine::errors::DecisionError;
use onecard_engine::player::PlayerAction;

#[derive(Debug, Clone)]
pub struct ScriptedAI {
    tokens: Vec<String>,
    position: usize,
}

impl ScriptedAI {
    /// Builds a script from a comma-separated list such as `call,raise:5,fold`.
    pub fn new(script: &str) -> Result<Self, String> {
        let tokens: Vec<String> = script
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.is_empty() {
            return Err("script needs at least one action".to_string());
        }
        Ok(Self {
            tokens,
            position: 0,
        })
    }
}

impl Strategy for ScriptedAI {
    fn name(&self) -> &str {
        "ScriptedAI"
    }

    fn decide_action(&mut self, _obs: &Observation) -> Result<PlayerAction, DecisionError> {
        let token = &self.tokens[self.position % self.tokens.len()];
        self.position += 1;
        Ok(token.parse::<PlayerAction>()?)
    }
}
