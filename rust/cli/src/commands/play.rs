//! Play command: one game between two strategies, narrated round by round.

use super::{entrant, resolve_chips, seat_names};
use crate::config::Config;
use crate::error::CliError;
use onecard_engine::engine::Engine;
use onecard_engine::game::GameResult;
use onecard_engine::logger::{ActionKind, ActionRecord, RoundEnd, RoundRecord};
use std::io::Write;

/// Handle the play command.
///
/// # Arguments
///
/// * `ai_a`, `ai_b` - Strategy specs for seat 1 and seat 2
/// * `seed` - Deck seed; falls back to the configured seed
/// * `chips` - Starting chips; falls back to the configured amount
/// * `config` - Resolved configuration
/// * `out` - Output stream for the narration
pub fn handle_play_command(
    ai_a: &str,
    ai_b: &str,
    seed: Option<u64>,
    chips: Option<i64>,
    config: &Config,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let seed = seed.unwrap_or(config.seed);
    let chips = resolve_chips(chips, config.starting_chips)?;
    let names = seat_names(ai_a, ai_b);
    let a = entrant(&names[0], ai_a, seed)?;
    let b = entrant(&names[1], ai_b, seed.wrapping_add(1))?;

    writeln!(
        out,
        "Game: {} vs {} (seed {}, {} chips each)",
        names[0], names[1], seed, chips
    )?;

    let engine = Engine::new(Some(seed), config.table_rules());
    let mut write_err = None;
    let result = engine.run_game_with(a, b, chips, |record| {
        if write_err.is_none() {
            if let Err(e) = write_round(out, &names, record) {
                write_err = Some(e);
            }
        }
    })?;
    if let Some(e) = write_err {
        return Err(e.into());
    }

    write_result(out, &result)?;
    Ok(())
}

pub(crate) fn write_round(
    out: &mut dyn Write,
    names: &[String; 2],
    record: &RoundRecord,
) -> std::io::Result<()> {
    let actions: Vec<String> = record
        .actions
        .iter()
        .map(|a| describe_action(names, a))
        .collect();
    let outcome = match record.end {
        RoundEnd::Fold { winner, .. } => format!("{} takes {}", names[winner], record.pot),
        RoundEnd::Showdown { winner } => {
            format!("showdown, {} wins {}", names[winner], record.pot)
        }
        RoundEnd::Tie => format!("tie on {}", record.pot),
    };
    write!(
        out,
        "Round {}: {}[{}] {}[{}] | {} | {}",
        record.round,
        names[0],
        record.cards[0],
        names[1],
        record.cards[1],
        actions.join(", "),
        outcome
    )?;
    if record.two_rule_transfer > 0 {
        write!(out, " + {} by the two-rule", record.two_rule_transfer)?;
    }
    writeln!(
        out,
        " | chips {}/{}",
        record.chips_after[0], record.chips_after[1]
    )
}

fn describe_action(names: &[String; 2], action: &ActionRecord) -> String {
    let who = &names[action.seat];
    match &action.action {
        ActionKind::Fold { forced: None } => format!("{} folds", who),
        ActionKind::Fold { forced: Some(reason) } => format!("{} folds ({:?})", who, reason),
        ActionKind::Call { paid } => format!("{} calls {}", who, paid),
        ActionKind::Raise { paid, .. } => format!("{} raises {}", who, paid),
    }
}

pub(crate) fn write_result(out: &mut dyn Write, result: &GameResult) -> std::io::Result<()> {
    let [a, b] = &result.players;
    match result.winner_name() {
        Some(name) => write!(out, "Winner: {}", name)?,
        None => write!(out, "Draw")?,
    }
    writeln!(
        out,
        " after {} rounds ({}) | final chips {}/{}",
        result.rounds, result.end_reason, a.final_chips, b.final_chips
    )
}
