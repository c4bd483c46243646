//! Round outcome of a single hand against the dealer.

use core::fmt;

/// The result of comparing one player hand against the dealer's hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The player wins at even money.
    PlayerWin,
    /// The dealer wins; the hand's bet is lost.
    DealerWin,
    /// A tie; the bet is returned.
    Push,
    /// The player holds a natural blackjack, paid 3:2.
    PlayerBlackjack,
    /// The dealer holds a natural blackjack.
    DealerBlackjack,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::PlayerWin => "Player Wins",
            Self::DealerWin => "Dealer Wins",
            Self::Push => "Push (Tie)",
            Self::PlayerBlackjack => "Player Blackjack!",
            Self::DealerBlackjack => "Dealer Blackjack!",
        };
        f.write_str(text)
    }
}
