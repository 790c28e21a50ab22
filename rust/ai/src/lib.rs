//! # onecard-ai: Built-in Strategies
//!
//! Strategy implementations for heads-up single-card poker, all implementing
//! [`onecard_engine::agent::Strategy`]. They stand in for uploaded decision
//! logic: a scheduler asks [`create_ai`] for a strategy by name.
//!
//! ## Quick Start
//!
//! ```rust
//! use onecard_ai::create_ai;
//! use onecard_engine::engine::{Engine, Entrant};
//! use onecard_engine::rules::TableRules;
//!
//! let a = create_ai("baseline", 1).expect("known strategy");
//! let b = create_ai("random", 2).expect("known strategy");
//!
//! let engine = Engine::new(Some(42), TableRules::default());
//! let result = engine
//!     .run_game(Entrant::new("Algorithm 1", a), Entrant::new("Algorithm 2", b), 100)
//!     .expect("game runs");
//! println!("winner: {:?}", result.winner_name());
//! ```
//!
//! ## Strategy Specs
//!
//! - `"call"` - always call
//! - `"fold"` - always fold
//! - `"raise"` / `"raise:N"` - always raise N (default 10)
//! - `"baseline"` - win-probability and pot-odds player
//! - `"random"` - seeded random mix
//! - `"script:a,b,..."` - replays a fixed list of actions, then repeats it

use onecard_engine::agent::Strategy;
use thiserror::Error;

pub mod baseline;
pub mod fixed;
pub mod random;
pub mod scripted;

/// Names accepted by [`create_ai`] (prefix form for parameterised ones).
pub const AVAILABLE_AIS: &[&str] = &["call", "fold", "raise[:N]", "baseline", "random", "script:<actions>"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AiError {
    #[error("Unknown AI type: {0}")]
    Unknown(String),
    #[error("Invalid parameter for {ai}: {detail}")]
    InvalidParameter { ai: String, detail: String },
}

/// Factory function to create strategies by spec string.
///
/// `seed` only matters for strategies with randomness.
///
/// # Example
///
/// ```rust
/// use onecard_ai::create_ai;
///
/// let ai = create_ai("baseline", 0).unwrap();
/// assert_eq!(ai.name(), "BaselineAI");
/// assert!(create_ai("nonsense", 0).is_err());
/// ```
pub fn create_ai(spec: &str, seed: u64) -> Result<Box<dyn Strategy>, AiError> {
    let spec = spec.trim();
    let (kind, param) = match spec.split_once(':') {
        Some((k, p)) => (k.to_ascii_lowercase(), Some(p)),
        None => (spec.to_ascii_lowercase(), None),
    };
    match (kind.as_str(), param) {
        ("call", None) => Ok(Box::new(fixed::CallingAI)),
        ("fold", None) => Ok(Box::new(fixed::FoldingAI)),
        ("raise", None) => Ok(Box::new(fixed::RaisingAI::new(fixed::DEFAULT_RAISE))),
        ("raise", Some(p)) => {
            let amount = p.trim().parse::<i64>().map_err(|e| AiError::InvalidParameter {
                ai: "raise".into(),
                detail: e.to_string(),
            })?;
            Ok(Box::new(fixed::RaisingAI::new(amount)))
        }
        ("baseline", None) => Ok(Box::new(baseline::BaselineAI::new())),
        ("random", None) => Ok(Box::new(random::RandomAI::new(seed))),
        ("script", Some(p)) => {
            let ai = scripted::ScriptedAI::new(p).map_err(|detail| AiError::InvalidParameter {
                ai: "script".into(),
                detail,
            })?;
            Ok(Box::new(ai))
        }
        _ => Err(AiError::Unknown(spec.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_knows_every_builtin() {
        assert_eq!(create_ai("call", 0).unwrap().name(), "CallingAI");
        assert_eq!(create_ai("FOLD", 0).unwrap().name(), "FoldingAI");
        assert_eq!(create_ai("raise", 0).unwrap().name(), "RaisingAI");
        assert_eq!(create_ai("raise:25", 0).unwrap().name(), "RaisingAI");
        assert_eq!(create_ai("random", 3).unwrap().name(), "RandomAI");
        assert_eq!(create_ai("script:call,fold", 0).unwrap().name(), "ScriptedAI");
    }

    #[test]
    fn factory_rejects_unknown_and_bad_params() {
        assert_eq!(
            create_ai("telepathic", 0).err(),
            Some(AiError::Unknown("telepathic".into()))
        );
        assert!(matches!(
            create_ai("raise:lots", 0).err(),
            Some(AiError::InvalidParameter { .. })
        ));
        assert!(matches!(
            create_ai("script:", 0).err(),
            Some(AiError::InvalidParameter { .. })
        ));
        assert!(create_ai("call:5", 0).is_err());
    }
}
