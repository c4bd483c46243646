//! A multi-player blackjack round engine.
//!
//! The crate provides a [`Game`] type that sequences a full round: dealing,
//! name-addressed player actions (hit, stand, split, double down, surrender),
//! the dealer's fixed playout, and per-hand settlement. Hands carry their own
//! bet, signed winnings, and an append-only action log; a player may split
//! into up to four concurrent hands. Cards are drawn from a multi-deck
//! [`Shoe`] that reshuffles once the cut card is reached.
//!
//! # Example
//!
//! ```
//! use twentyone::{Game, GameOptions};
//!
//! let mut game = Game::new(GameOptions::default().with_decks(2), 42);
//! game.add_player("Alice", 500);
//! game.start_new_round();
//! ```

pub mod card;
pub mod chips;
pub mod dealer;
pub mod error;
pub mod game;
pub mod hand;
pub mod options;
pub mod outcome;
pub mod player;
pub mod shoe;

// Re-export main types
pub use card::{Card, DECK_SIZE, Suit};
pub use chips::{ChipManager, DefaultChipManager};
pub use dealer::Dealer;
pub use error::{BetError, GameError, ShoeError};
pub use game::Game;
pub use hand::{Action, ActionKind, Hand, MAX_HANDS};
pub use options::GameOptions;
pub use outcome::Outcome;
pub use player::Player;
pub use shoe::Shoe;
