//! The dealer: a single hand played by a fixed strategy.

use core::fmt;

use crate::card::Card;
use crate::hand::Hand;

/// The blackjack dealer. Owns exactly one hand, never bets, never splits.
#[derive(Debug, Clone, Default)]
pub struct Dealer {
    hand: Hand,
}

impl Dealer {
    /// Creates a new dealer with an empty hand.
    #[must_use]
    pub fn new() -> Self {
        Self { hand: Hand::new() }
    }

    /// Returns the dealer's hand.
    #[must_use]
    pub const fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Adds a card as part of the initial deal.
    pub fn deal_card(&mut self, card: Card) {
        self.hand.deal_card(card);
    }

    /// Adds a card drawn during the dealer's playout.
    pub fn hit(&mut self, card: Card) {
        self.hand.hit(card);
    }

    /// Marks the dealer's hand as stood.
    pub fn stand(&mut self) {
        self.hand.stand();
    }

    /// Returns whether the dealer should take another card.
    ///
    /// The dealer hits on 16 or less and on soft 17, and stands on hard 17
    /// or anything 18 and above. Pure function of the hand; repeated calls
    /// give the same answer.
    #[must_use]
    pub fn should_hit(&self) -> bool {
        let value = self.hand.value();

        if self.hand.is_busted() {
            return false;
        }
        if value >= 17 && !self.hand.is_soft() {
            return false;
        }
        if value == 17 && self.hand.is_soft() {
            return true;
        }
        if value >= 18 {
            return false;
        }
        value <= 16
    }

    /// Returns the dealer's face-up card, if any has been dealt.
    #[must_use]
    pub fn upcard(&self) -> Option<&Card> {
        self.hand.cards().first()
    }

    /// Returns whether the dealer has a natural blackjack.
    #[must_use]
    pub fn has_blackjack(&self) -> bool {
        self.hand.is_blackjack()
    }

    /// Returns whether the dealer has busted.
    #[must_use]
    pub fn is_busted(&self) -> bool {
        self.hand.is_busted()
    }

    /// Returns the dealer's hand value.
    #[must_use]
    pub fn value(&self) -> u8 {
        self.hand.value()
    }

    /// Clears the dealer's hand for a new round.
    pub fn clear_hand(&mut self) {
        self.hand.clear();
    }

    /// Renders the dealer with the hole card hidden.
    #[must_use]
    pub fn to_hidden_string(&self) -> String {
        format!("Dealer: {}", self.hand.to_hidden_string())
    }
}

impl fmt::Display for Dealer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dealer: {}", self.hand)
    }
}
