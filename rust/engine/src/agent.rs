//! The boundary between the round engine and decision-making strategies.
//!
//! A [`Strategy`] is an opaque oracle: the engine hands it an [`Observation`]
//! and gets back a [`PlayerAction`]. [`Agent::decide`] guards that call so a
//! misbehaving strategy loses the round instead of aborting the game. Panics
//! and reported errors come back as a forced fold.
//!
//! Each strategy runs on its own worker thread and the agent waits for its
//! answer with the latency budget as a timeout. A strategy that misses the
//! budget is abandoned: the late answer is never read and the agent folds
//! every remaining decision of the game.

use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cards::Rank;
use crate::errors::DecisionError;
use crate::player::{Player, PlayerAction};

/// What an agent is allowed to see when it acts. Its own card is never included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    /// The opponent's card, visible to this agent
    pub opponent_card: Rank,
    /// Acting agent's balance
    pub own_chips: i64,
    /// Opponent's balance
    pub opponent_chips: i64,
    /// Chips currently in the pot
    pub pot: i64,
    /// Amount required to call
    pub current_bet: i64,
    /// True when the last action was a raise by the opponent
    pub facing_raise: bool,
    /// 1-based round number within the game
    pub round: u32,
}

impl Observation {
    /// What a call would actually cost, after the short-stack clamp.
    pub fn to_call(&self) -> i64 {
        self.current_bet.clamp(0, self.own_chips.max(0))
    }
}

/// Decision logic for one participant.
///
/// # Example Implementation
///
/// ```rust
/// use onecard_engine::agent::{Observation, Strategy};
/// use onecard_engine::errors::DecisionError;
/// use onecard_engine::player::PlayerAction;
///
/// struct CallAnything;
///
/// impl Strategy for CallAnything {
///     fn name(&self) -> &str {
///         "CallAnything"
///     }
///
///     fn decide_action(&mut self, _obs: &Observation) -> Result<PlayerAction, DecisionError> {
///         Ok(PlayerAction::Call)
///     }
/// }
/// ```
pub trait Strategy: Send {
    fn name(&self) -> &str;

    fn decide_action(&mut self, obs: &Observation) -> Result<PlayerAction, DecisionError>;
}

/// Why the engine folded on an agent's behalf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ForcedFold {
    /// The strategy reported an error or an unparseable action
    Malformed { detail: String },
    /// A raise of zero or less was requested
    NonPositiveRaise { amount: i64 },
    /// The strategy panicked
    Panicked { detail: String },
    /// No decision arrived within the latency budget
    Overran { elapsed_ms: u64, budget_ms: u64 },
    /// An earlier decision overran, so the strategy is no longer consulted
    Unresponsive,
}

/// Result of asking an agent to act.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Chosen(PlayerAction),
    Forced(ForcedFold),
}

/// The worker's answer: the strategy's result, or the panic message.
type Reply = Result<Result<PlayerAction, DecisionError>, String>;

/// Channels to the thread that owns a strategy.
struct Worker {
    requests: Sender<Observation>,
    replies: Receiver<Reply>,
}

impl Worker {
    fn spawn(label: &str, mut strategy: Box<dyn Strategy>) -> io::Result<Self> {
        let (requests, inbox) = mpsc::channel::<Observation>();
        let (outbox, replies) = mpsc::channel::<Reply>();
        thread::Builder::new()
            .name(format!("strategy-{}", label))
            .spawn(move || {
                // Ends when the agent is dropped or stops reading replies
                for obs in inbox {
                    let reply =
                        panic::catch_unwind(AssertUnwindSafe(|| strategy.decide_action(&obs)))
                            .map_err(|payload| panic_message(payload.as_ref()));
                    if outbox.send(reply).is_err() {
                        break;
                    }
                }
            })?;
        Ok(Self { requests, replies })
    }
}

/// A seated participant: table state plus the strategy that drives it.
pub struct Agent {
    player: Player,
    strategy_name: String,
    worker: Option<Worker>,
    timed_out: bool,
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("player", &self.player)
            .field("strategy", &self.strategy_name)
            .field("timed_out", &self.timed_out)
            .finish()
    }
}

impl Agent {
    /// Seats a strategy and starts the thread it decides on.
    pub fn new(name: impl Into<String>, chips: i64, strategy: Box<dyn Strategy>) -> Self {
        let player = Player::new(name, chips);
        let strategy_name = strategy.name().to_string();
        let worker = match Worker::spawn(player.name(), strategy) {
            Ok(worker) => Some(worker),
            Err(e) => {
                warn!(name = player.name(), error = %e, "strategy worker failed to start");
                None
            }
        };
        Self {
            player,
            strategy_name,
            worker,
            timed_out: false,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }
    pub fn name(&self) -> &str {
        self.player.name()
    }
    pub fn strategy_name(&self) -> &str {
        &self.strategy_name
    }
    /// True once a decision has missed its budget.
    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// Ask the strategy for an action, converting any misbehaviour into a forced fold.
    ///
    /// With a budget this returns no later than the budget, whether or not the
    /// strategy ever answers. Without one it waits for the strategy.
    pub fn decide(&mut self, obs: &Observation, budget: Option<Duration>) -> Decision {
        if self.timed_out {
            return Decision::Forced(ForcedFold::Unresponsive);
        }
        let Some(worker) = &self.worker else {
            return worker_stopped();
        };

        let started = Instant::now();
        if worker.requests.send(*obs).is_err() {
            return worker_stopped();
        }
        let reply = match budget {
            Some(b) => match worker.replies.recv_timeout(b) {
                Ok(reply) => reply,
                Err(RecvTimeoutError::Timeout) => {
                    self.timed_out = true;
                    return Decision::Forced(ForcedFold::Overran {
                        elapsed_ms: started.elapsed().as_millis() as u64,
                        budget_ms: b.as_millis() as u64,
                    });
                }
                Err(RecvTimeoutError::Disconnected) => return worker_stopped(),
            },
            None => match worker.replies.recv() {
                Ok(reply) => reply,
                Err(_) => return worker_stopped(),
            },
        };

        match reply {
            Err(detail) => Decision::Forced(ForcedFold::Panicked { detail }),
            Ok(Err(e)) => Decision::Forced(ForcedFold::Malformed {
                detail: e.to_string(),
            }),
            Ok(Ok(action)) => Decision::Chosen(action),
        }
    }
}

fn worker_stopped() -> Decision {
    Decision::Forced(ForcedFold::Panicked {
        detail: "strategy worker is not running".to_string(),
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Result<PlayerAction, DecisionError>);

    impl Strategy for Fixed {
        fn name(&self) -> &str {
            "Fixed"
        }
        fn decide_action(&mut self, _obs: &Observation) -> Result<PlayerAction, DecisionError> {
            self.0.clone()
        }
    }

    struct Panicking;

    impl Strategy for Panicking {
        fn name(&self) -> &str {
            "Panicking"
        }
        fn decide_action(&mut self, _obs: &Observation) -> Result<PlayerAction, DecisionError> {
            panic!("boom")
        }
    }

    struct Slow;

    impl Strategy for Slow {
        fn name(&self) -> &str {
            "Slow"
        }
        fn decide_action(&mut self, _obs: &Observation) -> Result<PlayerAction, DecisionError> {
            std::thread::sleep(Duration::from_millis(30));
            Ok(PlayerAction::Call)
        }
    }

    struct Stuck;

    impl Strategy for Stuck {
        fn name(&self) -> &str {
            "Stuck"
        }
        fn decide_action(&mut self, _obs: &Observation) -> Result<PlayerAction, DecisionError> {
            std::thread::sleep(Duration::from_secs(3));
            Ok(PlayerAction::Call)
        }
    }

    fn obs() -> Observation {
        Observation {
            opponent_card: Rank::Seven,
            own_chips: 10,
            opponent_chips: 10,
            pot: 3,
            current_bet: 2,
            facing_raise: false,
            round: 1,
        }
    }

    #[test]
    fn chosen_action_passes_through() {
        let mut a = Agent::new("a", 10, Box::new(Fixed(Ok(PlayerAction::Raise(4)))));
        assert_eq!(
            a.decide(&obs(), None),
            Decision::Chosen(PlayerAction::Raise(4))
        );
    }

    #[test]
    fn strategy_error_is_forced_fold() {
        let err = DecisionError::Malformed("check".into());
        let mut a = Agent::new("a", 10, Box::new(Fixed(Err(err))));
        assert!(matches!(
            a.decide(&obs(), None),
            Decision::Forced(ForcedFold::Malformed { .. })
        ));
    }

    #[test]
    fn panic_is_caught_and_forced_fold() {
        let mut a = Agent::new("a", 10, Box::new(Panicking));
        match a.decide(&obs(), None) {
            Decision::Forced(ForcedFold::Panicked { detail }) => assert_eq!(detail, "boom"),
            other => panic!("expected panic fold, got {:?}", other),
        }
    }

    #[test]
    fn failed_strategy_is_forced_fold_with_its_message() {
        let err = DecisionError::Failed("model unavailable".into());
        let mut a = Agent::new("a", 10, Box::new(Fixed(Err(err))));
        match a.decide(&obs(), None) {
            Decision::Forced(ForcedFold::Malformed { detail }) => {
                assert_eq!(detail, "strategy failed: model unavailable")
            }
            other => panic!("expected malformed fold, got {:?}", other),
        }
        assert!(!a.timed_out());
    }

    #[test]
    fn overrun_is_forced_fold_and_sticks() {
        let mut a = Agent::new("a", 10, Box::new(Slow));
        assert!(matches!(
            a.decide(&obs(), Some(Duration::from_millis(1))),
            Decision::Forced(ForcedFold::Overran { budget_ms: 1, .. })
        ));
        assert!(a.timed_out());
        assert_eq!(
            a.decide(&obs(), Some(Duration::from_secs(5))),
            Decision::Forced(ForcedFold::Unresponsive)
        );

        let mut patient = Agent::new("b", 10, Box::new(Slow));
        assert_eq!(
            patient.decide(&obs(), Some(Duration::from_secs(5))),
            Decision::Chosen(PlayerAction::Call)
        );
    }

    #[test]
    fn stuck_strategy_is_abandoned_at_the_budget() {
        let mut a = Agent::new("a", 10, Box::new(Stuck));
        let budget = Duration::from_millis(20);

        let started = Instant::now();
        let first = a.decide(&obs(), Some(budget));
        let waited = started.elapsed();
        assert!(
            matches!(first, Decision::Forced(ForcedFold::Overran { budget_ms: 20, .. })),
            "{:?}",
            first
        );
        assert!(waited < Duration::from_millis(500), "blocked for {:?}", waited);

        let started = Instant::now();
        assert_eq!(
            a.decide(&obs(), Some(budget)),
            Decision::Forced(ForcedFold::Unresponsive)
        );
        assert!(started.elapsed() < Duration::from_millis(100));
    }

    #[test]
    fn panicking_strategy_keeps_answering() {
        let mut a = Agent::new("a", 10, Box::new(Panicking));
        for _ in 0..2 {
            assert!(matches!(
                a.decide(&obs(), Some(Duration::from_secs(5))),
                Decision::Forced(ForcedFold::Panicked { .. })
            ));
        }
    }
}
