//! One round of play: blinds, the betting loop, and pot disbursement.
//!
//! The betting loop starts with the small blind to act and alternates seats
//! after every action. A call closes betting only when the other seat has
//! already acted in the current sequence; a raise (with
//! [`TableRules::raise_reopens_action`]) starts a new sequence so the answer
//! to it does not close betting by itself. Raises are clamped to the smaller
//! stack and must move at least one chip, so balances shrink with every raise
//! and the loop always ends.

use tracing::{debug, info, warn};

use crate::agent::{Agent, Decision, ForcedFold, Observation};
use crate::cards::Rank;
use crate::logger::{ActionKind, ActionRecord, RoundEnd, RoundRecord};
use crate::player::PlayerAction;
use crate::rules::{two_rule_bonus, validate_action, TableRules, TiePolicy, ValidatedAction};

/// Ephemeral betting state; lives only for one [`play_round`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BettingState {
    pot: i64,
    current_bet: i64,
    actor: usize,
    first_action: bool,
    facing_raise: bool,
}

/// Plays a single round and mutates both agents' chips and cards.
///
/// `cards[i]` is dealt to `agents[i]`. The small blind acts first.
pub fn play_round(
    agents: &mut [Agent; 2],
    small_blind: usize,
    cards: [Rank; 2],
    rules: &TableRules,
    round: u32,
) -> RoundRecord {
    let big_blind = 1 - small_blind;
    for (agent, card) in agents.iter_mut().zip(cards) {
        agent.player_mut().set_card(card);
    }

    let sb_paid = agents[small_blind].player_mut().take_chips(rules.small_blind);
    let bb_paid = agents[big_blind].player_mut().take_chips(rules.big_blind);
    if sb_paid < rules.small_blind || bb_paid < rules.big_blind {
        debug!(round, sb_paid, bb_paid, "short blind posted");
    }

    let mut state = BettingState {
        pot: sb_paid + bb_paid,
        current_bet: rules.big_blind,
        actor: small_blind,
        first_action: true,
        facing_raise: false,
    };
    let mut actions = Vec::new();

    let end = loop {
        let actor = state.actor;
        let opponent = 1 - actor;
        let obs = Observation {
            opponent_card: cards[opponent],
            own_chips: agents[actor].player().chips(),
            opponent_chips: agents[opponent].player().chips(),
            pot: state.pot,
            current_bet: state.current_bet,
            facing_raise: state.facing_raise,
            round,
        };

        let (validated, requested, forced) = match agents[actor].decide(&obs, rules.decision_budget) {
            Decision::Forced(reason) => (ValidatedAction::Fold, None, Some(reason)),
            Decision::Chosen(action) => {
                let requested = match action {
                    PlayerAction::Raise(n) => Some(n),
                    _ => None,
                };
                match validate_action(action, obs.own_chips, obs.opponent_chips, state.current_bet)
                {
                    Ok(v) => (v, requested, None),
                    Err(_) => (
                        ValidatedAction::Fold,
                        None,
                        Some(ForcedFold::NonPositiveRaise {
                            amount: requested.unwrap_or_default(),
                        }),
                    ),
                }
            }
        };

        if let Some(reason) = &forced {
            warn!(round, seat = actor, name = agents[actor].name(), ?reason, "forced fold");
        }

        match validated {
            ValidatedAction::Fold => {
                actions.push(ActionRecord {
                    seat: actor,
                    action: ActionKind::Fold { forced },
                    pot: state.pot,
                });
                debug!(round, seat = actor, pot = state.pot, "fold");
                break RoundEnd::Fold {
                    folder: actor,
                    winner: opponent,
                };
            }
            ValidatedAction::Call(amount) => {
                let paid = agents[actor].player_mut().take_chips(amount);
                state.pot += paid;
                actions.push(ActionRecord {
                    seat: actor,
                    action: ActionKind::Call { paid },
                    pot: state.pot,
                });
                debug!(round, seat = actor, paid, pot = state.pot, "call");
                if !state.first_action {
                    break showdown(cards);
                }
                state.first_action = false;
                state.facing_raise = false;
            }
            ValidatedAction::Raise(amount) => {
                let paid = agents[actor].player_mut().take_chips(amount);
                state.pot += paid;
                state.current_bet = paid;
                actions.push(ActionRecord {
                    seat: actor,
                    action: ActionKind::Raise {
                        requested: requested.unwrap_or(amount),
                        paid,
                    },
                    pot: state.pot,
                });
                debug!(round, seat = actor, paid, pot = state.pot, "raise");
                state.first_action = rules.raise_reopens_action;
                state.facing_raise = true;
            }
        }
        state.actor = opponent;
    };

    let two_rule_transfer = settle(agents, end, state.pot, big_blind, rules.tie_policy);

    let record = RoundRecord {
        round,
        small_blind,
        cards,
        actions,
        pot: state.pot,
        end,
        two_rule_transfer,
        chips_after: [agents[0].player().chips(), agents[1].player().chips()],
    };
    info!(
        round,
        pot = record.pot,
        winner = ?end.winner().map(|s| agents[s].name().to_string()),
        two_rule_transfer,
        chips = ?record.chips_after,
        "round complete"
    );
    record
}

fn showdown(cards: [Rank; 2]) -> RoundEnd {
    use std::cmp::Ordering;
    match cards[0].cmp(&cards[1]) {
        Ordering::Greater => RoundEnd::Showdown { winner: 0 },
        Ordering::Less => RoundEnd::Showdown { winner: 1 },
        Ordering::Equal => RoundEnd::Tie,
    }
}

/// Pays out the pot and applies the two-rule. Returns the two-rule transfer.
fn settle(
    agents: &mut [Agent; 2],
    end: RoundEnd,
    pot: i64,
    big_blind: usize,
    tie_policy: TiePolicy,
) -> i64 {
    let Some(winner) = end.winner() else {
        if tie_policy == TiePolicy::Split {
            let half = pot / 2;
            agents[1 - big_blind].player_mut().add_chips(half);
            agents[big_blind].player_mut().add_chips(pot - half);
        }
        return 0;
    };
    let loser = 1 - winner;
    agents[winner].player_mut().add_chips(pot);

    let winning_card = agents[winner].player().card();
    let bonus = winning_card
        .map(|c| two_rule_bonus(c, agents[loser].player().chips()))
        .unwrap_or(0);
    if bonus > 0 {
        let taken = agents[loser].player_mut().take_chips(bonus);
        agents[winner].player_mut().add_chips(taken);
        info!(
            winner = agents[winner].name(),
            loser = agents[loser].name(),
            taken,
            "two-rule: winner takes half of loser's stack"
        );
        return taken;
    }
    0
}
