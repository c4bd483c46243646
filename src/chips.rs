//! Pluggable chip-balance management.

use crate::error::BetError;

/// Operations for managing a player's chip balance.
///
/// Betting logic in [`Hand`](crate::Hand) and [`Player`](crate::Player) only
/// ever talks to this trait, so alternate policies (spending caps,
/// persistence-backed accounts) can be injected without touching the rules.
pub trait ChipManager {
    /// Returns the current chip count.
    fn chips(&self) -> usize;

    /// Sets the chip count to the specified amount.
    fn set_chips(&mut self, amount: usize);

    /// Adds the specified amount to the chip count.
    fn add_chips(&mut self, amount: usize);

    /// Removes the specified amount from the chip count.
    ///
    /// # Errors
    ///
    /// Returns [`BetError::InsufficientChips`] if the balance cannot cover
    /// the amount; the balance is left unchanged.
    fn deduct_chips(&mut self, amount: usize) -> Result<(), BetError>;

    /// Returns whether the balance covers the specified amount.
    fn has_enough_chips(&self, amount: usize) -> bool {
        self.chips() >= amount
    }
}

/// Simple counter-backed [`ChipManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DefaultChipManager {
    chips: usize,
}

impl DefaultChipManager {
    /// Creates a new chip manager with the given initial balance.
    #[must_use]
    pub const fn new(initial_chips: usize) -> Self {
        Self {
            chips: initial_chips,
        }
    }
}

impl ChipManager for DefaultChipManager {
    fn chips(&self) -> usize {
        self.chips
    }

    fn set_chips(&mut self, amount: usize) {
        self.chips = amount;
    }

    fn add_chips(&mut self, amount: usize) {
        self.chips += amount;
    }

    fn deduct_chips(&mut self, amount: usize) -> Result<(), BetError> {
        if amount > self.chips {
            return Err(BetError::InsufficientChips {
                have: self.chips,
                need: amount,
            });
        }
        self.chips -= amount;
        Ok(())
    }
}
