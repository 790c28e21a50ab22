#![allow(dead_code)]

use onecard_engine::agent::{Observation, Strategy};
use onecard_engine::errors::DecisionError;
use onecard_engine::player::PlayerAction;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub struct Always(pub PlayerAction);

impl Strategy for Always {
    fn name(&self) -> &str {
        "Always"
    }
    fn decide_action(&mut self, _obs: &Observation) -> Result<PlayerAction, DecisionError> {
        Ok(self.0)
    }
}

/// Seeded mix of folds, calls and raises of up to 40 chips.
pub struct Noisy(pub ChaCha8Rng);

impl Noisy {
    pub fn new(seed: u64) -> Self {
        Noisy(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Strategy for Noisy {
    fn name(&self) -> &str {
        "Noisy"
    }
    fn decide_action(&mut self, _obs: &Observation) -> Result<PlayerAction, DecisionError> {
        Ok(match self.0.random_range(0..10) {
            0 => PlayerAction::Fold,
            1..=5 => PlayerAction::Call,
            _ => PlayerAction::Raise(self.0.random_range(1..=40)),
        })
    }
}

/// Raises an absurd amount every time it acts.
pub struct Maniac;

impl Strategy for Maniac {
    fn name(&self) -> &str {
        "Maniac"
    }
    fn decide_action(&mut self, _obs: &Observation) -> Result<PlayerAction, DecisionError> {
        Ok(PlayerAction::Raise(i64::MAX / 4))
    }
}

/// Never answers within any sensible budget.
pub struct Sleeper(pub std::time::Duration);

impl Strategy for Sleeper {
    fn name(&self) -> &str {
        "Sleeper"
    }
    fn decide_action(&mut self, _obs: &Observation) -> Result<PlayerAction, DecisionError> {
        std::thread::sleep(self.0);
        Ok(PlayerAction::Call)
    }
}
