use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{all_ranks, Rank};
use crate::errors::GameError;

/// Source of the two cards for a round. Index 0 goes to seat 0, index 1 to seat 1.
pub trait Dealer: Send {
    fn deal_pair(&mut self) -> [Rank; 2];
}

/// The 13-rank deck, rebuilt and reshuffled for every deal.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Rank>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: all_ranks().to_vec(),
            position: 0,
            rng,
        }
    }

    pub fn shuffle(&mut self) {
        self.cards = all_ranks().to_vec();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    pub fn deal_card(&mut self) -> Option<Rank> {
        let c = self.cards.get(self.position).copied()?;
        self.position += 1;
        Some(c)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}

impl Dealer for Deck {
    fn deal_pair(&mut self) -> [Rank; 2] {
        self.shuffle();
        let first = self.cards[0];
        let second = self.cards[1];
        self.position = 2;
        [first, second]
    }
}

/// Replays a fixed list of pairs, cycling when exhausted.
///
/// Used for forced deals in tests and replays. Pairs are taken as given, so a
/// pair of equal ranks can be used to rig a showdown tie.
#[derive(Debug, Clone)]
pub struct StackedDeck {
    pairs: Vec<[Rank; 2]>,
    next: usize,
}

impl StackedDeck {
    pub fn new(pairs: Vec<[Rank; 2]>) -> Result<Self, GameError> {
        if pairs.is_empty() {
            return Err(GameError::EmptyStackedDeck);
        }
        Ok(Self { pairs, next: 0 })
    }
}

impl Dealer for StackedDeck {
    fn deal_pair(&mut self) -> [Rank; 2] {
        let pair = self.pairs[self.next % self.pairs.len()];
        self.next += 1;
        pair
    }
}
