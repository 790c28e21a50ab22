use crate::agent::{Agent, Strategy};
use crate::deck::{Dealer, Deck};
use crate::errors::GameError;
use crate::game::{Game, GameResult};
use crate::logger::RoundRecord;
use crate::rules::TableRules;

pub const DEFAULT_SEED: u64 = 0xA1A2_A3A4;
pub const DEFAULT_STARTING_CHIPS: i64 = 100;
/// Largest stack a game may start with; both stacks together must fit in the pot.
pub const MAX_STARTING_CHIPS: i64 = i64::MAX / 2;

/// A named strategy waiting to be seated.
pub struct Entrant {
    pub name: String,
    pub strategy: Box<dyn Strategy>,
}

impl Entrant {
    pub fn new(name: impl Into<String>, strategy: Box<dyn Strategy>) -> Self {
        Self {
            name: name.into(),
            strategy,
        }
    }
}

/// Entry point for schedulers: one call runs one complete game.
///
/// # Examples
///
/// ```
/// use onecard_engine::agent::{Observation, Strategy};
/// use onecard_engine::engine::{Engine, Entrant};
/// use onecard_engine::errors::DecisionError;
/// use onecard_engine::player::PlayerAction;
/// use onecard_engine::rules::TableRules;
///
/// struct Caller;
/// impl Strategy for Caller {
///     fn name(&self) -> &str { "Caller" }
///     fn decide_action(&mut self, _: &Observation) -> Result<PlayerAction, DecisionError> {
///         Ok(PlayerAction::Call)
///     }
/// }
///
/// let engine = Engine::new(Some(7), TableRules::default());
/// let result = engine
///     .run_game(Entrant::new("A", Box::new(Caller)), Entrant::new("B", Box::new(Caller)), 100)
///     .expect("valid game");
/// let total = result.players[0].final_chips + result.players[1].final_chips;
/// assert_eq!(total, 200);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    seed: u64,
    rules: TableRules,
}

impl Engine {
    pub fn new(seed: Option<u64>, rules: TableRules) -> Self {
        Self {
            seed: seed.unwrap_or(DEFAULT_SEED),
            rules,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
    pub fn rules(&self) -> &TableRules {
        &self.rules
    }

    pub fn run_game(
        &self,
        a: Entrant,
        b: Entrant,
        starting_chips: i64,
    ) -> Result<GameResult, GameError> {
        self.run_game_with(a, b, starting_chips, |_| {})
    }

    /// Like [`Engine::run_game`], passing every round record to `observer`.
    pub fn run_game_with<F>(
        &self,
        a: Entrant,
        b: Entrant,
        starting_chips: i64,
        observer: F,
    ) -> Result<GameResult, GameError>
    where
        F: FnMut(&RoundRecord),
    {
        let dealer = Box::new(Deck::new_with_seed(self.seed));
        self.run_game_dealt(a, b, starting_chips, dealer, observer)
    }

    /// Runs a game with a caller-supplied dealer (forced deals, replays).
    pub fn run_game_dealt<F>(
        &self,
        a: Entrant,
        b: Entrant,
        starting_chips: i64,
        dealer: Box<dyn Dealer>,
        observer: F,
    ) -> Result<GameResult, GameError>
    where
        F: FnMut(&RoundRecord),
    {
        if starting_chips <= 0 || starting_chips > MAX_STARTING_CHIPS {
            return Err(GameError::InvalidStartingChips(starting_chips));
        }
        let agents = [
            Agent::new(a.name, starting_chips, a.strategy),
            Agent::new(b.name, starting_chips, b.strategy),
        ];
        let mut game = Game::new(agents, dealer, self.rules.clone());
        Ok(game.run_with(observer))
    }
}
