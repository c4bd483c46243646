//! The shoe: a multi-deck draw pile with a cut-card reshuffle policy.

use core::fmt;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::card::{Card, DECK_SIZE, SUITS};
use crate::error::ShoeError;

/// Default fraction of the shoe dealt before the cut card is reached.
pub const DEFAULT_PENETRATION: f64 = 0.75;

/// A multi-deck pool of cards with a cut card marking the reshuffle point.
///
/// The shoe owns a seeded RNG so shuffles are reproducible per instance.
/// [`Shoe::draw`] never reshuffles on its own; callers check
/// [`Shoe::needs_reshuffle`] at round boundaries and call
/// [`Shoe::reshuffle`], which replaces the pool wholesale.
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: Vec<Card>,
    num_decks: usize,
    penetration: f64,
    cut_card: usize,
    rng: ChaCha8Rng,
}

impl Shoe {
    /// Creates a shuffled shoe with the specified number of decks and the
    /// default cut-card penetration. A deck count below 1 is clamped to 1.
    #[must_use]
    pub fn new(num_decks: usize, seed: u64) -> Self {
        let num_decks = num_decks.max(1);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut cards = build_pool(num_decks);
        cards.shuffle(&mut rng);

        let cut_card = (cards.len() as f64 * DEFAULT_PENETRATION) as usize;

        Self {
            cards,
            num_decks,
            penetration: DEFAULT_PENETRATION,
            cut_card,
            rng,
        }
    }

    /// Sets the cut-card penetration fraction and recomputes the cut
    /// position against the full shoe size.
    #[must_use]
    pub fn with_penetration(mut self, penetration: f64) -> Self {
        self.penetration = penetration;
        self.cut_card = ((self.num_decks * DECK_SIZE) as f64 * penetration) as usize;
        self
    }

    /// Removes and returns the next card.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::Empty`] if no cards remain. The shoe is never
    /// reshuffled implicitly.
    pub fn draw(&mut self) -> Result<Card, ShoeError> {
        self.cards.pop().ok_or(ShoeError::Empty)
    }

    /// Returns whether the shoe has no cards left.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the number of cards left in the shoe.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.cards.len()
    }

    /// Returns the number of decks the shoe was built from.
    #[must_use]
    pub const fn num_decks(&self) -> usize {
        self.num_decks
    }

    /// Returns whether the cut card has been reached and the shoe should be
    /// reshuffled at the next opportunity.
    #[must_use]
    pub fn needs_reshuffle(&self) -> bool {
        self.cards.len() <= (self.num_decks * DECK_SIZE).saturating_sub(self.cut_card)
    }

    /// Discards the remaining pool and rebuilds a full, freshly shuffled
    /// shoe, recomputing the cut position from the configured penetration.
    pub fn reshuffle(&mut self) {
        self.cards = build_pool(self.num_decks);
        self.cards.shuffle(&mut self.rng);
        self.cut_card = (self.cards.len() as f64 * self.penetration) as usize;
        debug!(
            decks = self.num_decks,
            cards = self.cards.len(),
            "reshuffled shoe"
        );
    }

    /// Returns the percentage of the shoe's cards already dealt.
    #[must_use]
    pub fn penetration(&self) -> f64 {
        let total = self.num_decks * DECK_SIZE;
        let dealt = total - self.cards.len();
        dealt as f64 / total as f64 * 100.0
    }

    /// Replaces the pool with the given cards, drawn from the back.
    ///
    /// Intended for deterministic replays and tests; the cut position is
    /// left untouched.
    pub fn load(&mut self, cards: Vec<Card>) {
        self.cards = cards;
    }
}

fn build_pool(num_decks: usize) -> Vec<Card> {
    let mut cards = Vec::with_capacity(num_decks * DECK_SIZE);
    for _ in 0..num_decks {
        for suit in SUITS {
            for rank in 1..=13 {
                cards.push(Card::new(suit, rank));
            }
        }
    }
    cards
}

impl fmt::Display for Shoe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Shoe: {} decks, {} cards remaining ({:.1}% penetration)",
            self.num_decks,
            self.cards.len(),
            self.penetration()
        )
    }
}
