//! Error types for game operations.

use thiserror::Error;

/// Errors that can occur when drawing from the shoe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShoeError {
    /// The shoe has no cards left. Fatal for the current round step; the
    /// caller is expected to reshuffle before the next round.
    #[error("shoe is empty")]
    Empty,
}

/// Errors that can occur when placing or raising a bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// Bet amount was zero.
    #[error("bet must be positive")]
    NonPositiveBet,
    /// The chip balance cannot cover the amount.
    #[error("insufficient chips: have {have}, need {need}")]
    InsufficientChips {
        /// Chips currently available.
        have: usize,
        /// Chips the operation required.
        need: usize,
    },
}

/// Errors returned by round-level operations on [`Game`](crate::Game).
///
/// Precondition violations never mutate state; the caller may simply pick a
/// different action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// No player with the given name is at the table.
    #[error("player {0} not found")]
    PlayerNotFound(String),
    /// The player has already finished the round.
    #[error("player {0} is not active")]
    PlayerNotActive(String),
    /// The player's current hand is already terminal.
    #[error("player {0} is already standing")]
    AlreadyStanding(String),
    /// The current hand does not meet the double-down preconditions.
    #[error("cannot double down on this hand")]
    CannotDoubleDown,
    /// The current hand does not meet the split preconditions.
    #[error("cannot split this hand")]
    CannotSplit,
    /// The current hand does not meet the surrender preconditions.
    #[error("cannot surrender at this point")]
    CannotSurrender,
    /// A bet or chip deduction failed.
    #[error(transparent)]
    Bet(#[from] BetError),
    /// The shoe ran out of cards mid-action.
    #[error(transparent)]
    Shoe(#[from] ShoeError),
}
