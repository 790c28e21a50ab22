//! Seeded random strategy, useful as a noisy sparring partner.

use onecard_engine::agent::{Observation, Strategy};
use onecard_engine::errors::DecisionError;
use onecard_engine::player::PlayerAction;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Folds 10%, calls 60%, raises 30% of the time (1..=pot+current_bet chips).
#[derive(Debug, Clone)]
pub struct RandomAI {
    rng: ChaCha8Rng,
}

impl RandomAI {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Strategy for RandomAI {
    fn name(&self) -> &str {
        "RandomAI"
    }

    fn decide_action(&mut self, obs: &Observation) -> Result<PlayerAction, DecisionError> {
        let roll = self.rng.random_range(0..100u32);
        Ok(match roll {
            0..10 => PlayerAction::Fold,
            10..70 => PlayerAction::Call,
            _ => {
                let cap = (obs.pot + obs.current_bet).max(1);
                PlayerAction::Raise(self.rng.random_range(1..=cap))
            }
        })
    }
}
