//! Command handler modules for the onecard CLI.
//!
//! Each command lives in its own file and exposes
//! `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`, writing to
//! injected `&mut dyn Write` streams so tests can capture output.

pub mod cfg;
pub mod leaderboard;
pub mod play;
pub mod sim;
pub mod tournament;

pub use cfg::handle_cfg_command;
pub use leaderboard::handle_leaderboard_command;
pub use play::handle_play_command;
pub use sim::handle_sim_command;
pub use tournament::handle_tournament_command;

use crate::error::CliError;
use onecard_ai::{AVAILABLE_AIS, AiError, create_ai};
use onecard_engine::engine::{Entrant, MAX_STARTING_CHIPS};

/// Display names for two seats; identical specs get a seat suffix.
pub(crate) fn seat_names(a: &str, b: &str) -> [String; 2] {
    if a == b {
        [format!("{}#1", a), format!("{}#2", b)]
    } else {
        [a.to_string(), b.to_string()]
    }
}

/// Builds an entrant from a strategy spec. Strategy randomness is derived from
/// the game seed so a seed replays the whole game.
pub(crate) fn entrant(name: &str, spec: &str, seed: u64) -> Result<Entrant, CliError> {
    match create_ai(spec, seed) {
        Ok(strategy) => Ok(Entrant::new(name, strategy)),
        Err(e @ AiError::Unknown(_)) => Err(CliError::InvalidInput(format!(
            "{} (available: {})",
            e,
            AVAILABLE_AIS.join(", ")
        ))),
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn resolve_chips(chips: Option<i64>, default: i64) -> Result<i64, CliError> {
    match chips.unwrap_or(default) {
        c if c <= 0 => Err(CliError::InvalidInput(format!(
            "starting chips must be >0, got {}",
            c
        ))),
        c if c > MAX_STARTING_CHIPS => Err(CliError::InvalidInput(format!(
            "starting chips must be at most {}, got {}",
            MAX_STARTING_CHIPS, c
        ))),
        c => Ok(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_specs_get_seat_suffixes() {
        assert_eq!(seat_names("call", "fold"), ["call", "fold"]);
        assert_eq!(seat_names("call", "call"), ["call#1", "call#2"]);
    }

    #[test]
    fn chips_must_be_positive() {
        assert_eq!(resolve_chips(None, 100).unwrap(), 100);
        assert_eq!(resolve_chips(Some(7), 100).unwrap(), 7);
        assert!(matches!(
            resolve_chips(Some(0), 100),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn chips_are_capped_so_the_pot_fits() {
        assert_eq!(
            resolve_chips(Some(MAX_STARTING_CHIPS), 100).unwrap(),
            MAX_STARTING_CHIPS
        );
        assert!(matches!(
            resolve_chips(Some(MAX_STARTING_CHIPS + 1), 100),
            Err(CliError::InvalidInput(_))
        ));
        assert!(matches!(
            resolve_chips(None, i64::MAX),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn unknown_strategy_is_invalid_input() {
        match entrant("x", "psychic", 1) {
            Err(CliError::InvalidInput(msg)) => {
                assert!(msg.starts_with("Unknown AI type: psychic"), "{}", msg);
                assert!(msg.contains("baseline"), "{}", msg);
            }
            other => panic!("expected invalid input, got {:?}", other.map(|e| e.name)),
        }
    }
}
