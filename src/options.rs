//! Game configuration options.

use crate::shoe::DEFAULT_PENETRATION;

/// Configuration options for a blackjack game.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use twentyone::GameOptions;
///
/// let options = GameOptions::default()
///     .with_decks(6)
///     .with_penetration(0.8);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GameOptions {
    /// Number of decks in the shoe. Values below 1 are clamped up to 1.
    pub decks: usize,
    /// Cut-card penetration: the fraction of the shoe dealt before a
    /// reshuffle is triggered.
    pub penetration: f64,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            decks: 1,
            penetration: DEFAULT_PENETRATION,
        }
    }
}

impl GameOptions {
    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use twentyone::GameOptions;
    ///
    /// let options = GameOptions::default().with_decks(6);
    /// assert_eq!(options.decks, 6);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: usize) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the cut-card penetration fraction.
    ///
    /// # Example
    ///
    /// ```
    /// use twentyone::GameOptions;
    ///
    /// let options = GameOptions::default().with_penetration(0.8);
    /// assert_eq!(options.penetration, 0.8);
    /// ```
    #[must_use]
    pub const fn with_penetration(mut self, penetration: f64) -> Self {
        self.penetration = penetration;
        self
    }
}
