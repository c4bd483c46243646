//! The player: one to four hands, a chip balance, and a turn cursor.

use core::fmt;

use crate::chips::{ChipManager, DefaultChipManager};
use crate::error::{BetError, GameError};
use crate::hand::Hand;

/// A blackjack player.
///
/// A player owns an ordered collection of hands (the second through fourth
/// created by splitting) and a cursor selecting the hand receiving actions
/// during sequential play. The chip balance sits behind a [`ChipManager`] so
/// alternate balance policies can be injected at construction.
pub struct Player {
    name: String,
    hands: Vec<Hand>,
    chips: Box<dyn ChipManager>,
    active: bool,
    current: usize,
}

impl Player {
    /// Creates a new player with the given name and starting chips, backed
    /// by a [`DefaultChipManager`].
    #[must_use]
    pub fn new(name: &str, chips: usize) -> Self {
        Self::with_chip_manager(name, Box::new(DefaultChipManager::new(chips)))
    }

    /// Creates a new player with a custom chip manager.
    #[must_use]
    pub fn with_chip_manager(name: &str, chips: Box<dyn ChipManager>) -> Self {
        Self {
            name: name.to_owned(),
            hands: vec![Hand::new()],
            chips,
            active: true,
            current: 0,
        }
    }

    /// Returns the player's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns all of the player's hands in play order.
    #[must_use]
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    /// Returns the hand the cursor currently selects.
    #[must_use]
    pub fn current_hand(&self) -> &Hand {
        &self.hands[self.current]
    }

    /// Returns a mutable reference to the hand the cursor selects.
    pub fn current_hand_mut(&mut self) -> &mut Hand {
        &mut self.hands[self.current]
    }

    /// Returns a mutable reference to the hand at `index`, if it exists.
    pub fn hand_mut(&mut self, index: usize) -> Option<&mut Hand> {
        self.hands.get_mut(index)
    }

    /// Returns the index of the current hand.
    #[must_use]
    pub const fn current_hand_index(&self) -> usize {
        self.current
    }

    /// Returns the player's chip balance.
    #[must_use]
    pub fn chips(&self) -> usize {
        self.chips.chips()
    }

    /// Adds chips to the player's balance.
    pub fn add_chips(&mut self, amount: usize) {
        self.chips.add_chips(amount);
    }

    /// Returns whether the player is still active in the round.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Sets the player's active status for the round.
    pub const fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Places a bet on the current hand, deducting it from the chip balance.
    ///
    /// # Errors
    ///
    /// Returns a [`BetError`] for a zero amount or an amount the balance
    /// cannot cover; nothing changes on error.
    pub fn place_bet(&mut self, amount: usize) -> Result<(), BetError> {
        self.hands[self.current].place_bet(amount, &mut *self.chips)
    }

    /// Returns whether the current hand can double down.
    #[must_use]
    pub fn can_double_down(&self) -> bool {
        self.hands[self.current].can_double_down(&*self.chips)
    }

    /// Doubles the bet on the current hand. The hand still expects exactly
    /// one more card followed by a stand, both driven by the orchestrator.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::CannotDoubleDown`] or a [`BetError`] without
    /// mutating state when the preconditions fail.
    pub fn double_down(&mut self) -> Result<(), GameError> {
        self.hands[self.current].double_down(&mut *self.chips)
    }

    /// Returns whether the current hand can split.
    #[must_use]
    pub fn can_split(&self) -> bool {
        self.hands[self.current].can_split(self.hands.len(), &*self.chips)
    }

    /// Splits the current hand, appending the new sibling hand and deducting
    /// a matching bet from the chip balance.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::CannotSplit`] or a [`BetError`] without mutating
    /// state when the preconditions fail.
    pub fn split(&mut self) -> Result<(), GameError> {
        let count = self.hands.len();
        let sibling = self.hands[self.current].split(count, &mut *self.chips)?;
        self.hands.push(sibling);
        Ok(())
    }

    /// Returns whether the current hand can surrender (only before any
    /// split, on an untouched two-card hand).
    #[must_use]
    pub fn can_surrender(&self) -> bool {
        self.hands[self.current].can_surrender(self.hands.len())
    }

    /// Surrenders the current hand, returning half the bet to the chips.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::CannotSurrender`] without mutating state when
    /// the preconditions fail.
    pub fn surrender(&mut self) -> Result<(), GameError> {
        let count = self.hands.len();
        self.hands[self.current].surrender(count, &mut *self.chips)
    }

    /// Returns whether the current hand is terminal: the player is inactive,
    /// or the hand is busted, a blackjack, or stood.
    #[must_use]
    pub fn is_standing(&self) -> bool {
        if !self.active {
            return true;
        }
        let hand = &self.hands[self.current];
        hand.is_busted() || hand.is_blackjack() || hand.is_stood()
    }

    /// Returns whether any hand from the cursor onward is still playable.
    #[must_use]
    pub fn has_active_hands(&self) -> bool {
        if !self.active {
            return false;
        }
        self.hands[self.current..]
            .iter()
            .any(|hand| !hand.is_busted() && !hand.is_blackjack() && !hand.is_stood())
    }

    /// Advances the cursor to the next playable hand, returning `true` on
    /// success. The cursor is left unchanged when no playable hand remains.
    pub fn move_to_next_active_hand(&mut self) -> bool {
        for i in self.current + 1..self.hands.len() {
            let hand = &self.hands[i];
            if !hand.is_busted() && !hand.is_blackjack() && !hand.is_stood() {
                self.current = i;
                return true;
            }
        }
        false
    }

    /// Resets the player to exactly one fresh hand with the cursor on it,
    /// discarding any split hands from the prior round.
    pub fn clear_hands(&mut self) {
        self.hands.clear();
        self.hands.push(Hand::new());
        self.current = 0;
    }

    /// Returns the value of every hand, in play order.
    #[must_use]
    pub fn hand_values(&self) -> Vec<u8> {
        self.hands.iter().map(Hand::value).collect()
    }

    /// Settles the hand at `index` against the given outcome, routing all
    /// chip movement through the hand's betting primitives.
    pub(crate) fn settle_hand(&mut self, index: usize, outcome: crate::outcome::Outcome) {
        use crate::outcome::Outcome;

        let Some(hand) = self.hands.get_mut(index) else {
            return;
        };
        match outcome {
            Outcome::PlayerWin => hand.win_bet(1.0, &mut *self.chips),
            Outcome::PlayerBlackjack => hand.win_bet(1.5, &mut *self.chips),
            Outcome::Push => hand.push_bet(&mut *self.chips),
            Outcome::DealerWin | Outcome::DealerBlackjack => hand.lose_bet(),
        }
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("name", &self.name)
            .field("hands", &self.hands)
            .field("chips", &self.chips.chips())
            .field("active", &self.active)
            .field("current", &self.current)
            .finish()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.active { "active" } else { "inactive" };

        if self.hands.len() == 1 {
            return write!(
                f,
                "{} (Chips: {}, Bet: {}, {}): {}",
                self.name,
                self.chips.chips(),
                self.hands[0].bet(),
                status,
                self.hands[0]
            );
        }

        writeln!(
            f,
            "{} (Chips: {}, {}):",
            self.name,
            self.chips.chips(),
            status
        )?;
        for (i, hand) in self.hands.iter().enumerate() {
            let marker = if i == self.current { " *CURRENT*" } else { "" };
            writeln!(f, "  Hand {}: {} (Bet: {}){}", i + 1, hand, hand.bet(), marker)?;
        }
        Ok(())
    }
}
