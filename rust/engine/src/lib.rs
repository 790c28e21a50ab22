//! # onecard-engine: Heads-Up Single-Card Poker Core
//!
//! Simulates heads-up, single-card draw poker between two pluggable
//! strategies. Each round posts blinds, deals one rank to each seat, runs the
//! fold/call/raise betting loop and pays the pot out by fold or showdown,
//! including the two-rule (winning with a Two also takes half the loser's
//! remaining chips). A game repeats rounds, swapping the blinds each time,
//! until a seat is out of chips.
//!
//! ## Core Modules
//!
//! - [`cards`] - Ranks 2..=14 (Ace high), no suits
//! - [`deck`] - Seeded ChaCha20 deck and the [`deck::Dealer`] seam
//! - [`player`] - Player balance/card state and [`player::PlayerAction`]
//! - [`agent`] - The [`agent::Strategy`] trait and the guarded decision boundary
//! - [`rules`] - Blinds, tie policy, action clamping, the two-rule
//! - [`round`] - One round of play
//! - [`game`] - Repeated rounds with blind rotation
//! - [`engine`] - Single entry point for schedulers
//! - [`logger`] - Round records and JSONL history
//! - [`errors`] - Error types
//!
//! ## Deterministic Gameplay
//!
//! Every deal comes from an explicitly seeded generator:
//!
//! ```rust
//! use onecard_engine::deck::{Dealer, Deck};
//!
//! let mut d1 = Deck::new_with_seed(42);
//! let mut d2 = Deck::new_with_seed(42);
//! assert_eq!(d1.deal_pair(), d2.deal_pair());
//! ```

pub mod agent;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod logger;
pub mod player;
pub mod round;
pub mod rules;
