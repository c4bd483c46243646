//! The round orchestrator: sequences dealing, player turns, the dealer's
//! playout, and settlement across a table of players.

use core::fmt::Write as _;

use tracing::debug;

use crate::chips::ChipManager;
use crate::dealer::Dealer;
use crate::error::{GameError, ShoeError};
use crate::hand::Hand;
use crate::options::GameOptions;
use crate::outcome::Outcome;
use crate::player::Player;
use crate::shoe::Shoe;

/// A blackjack table: one dealer, one shoe, and the players seated at it.
///
/// The orchestrator is driven externally, one call per step: start a round,
/// deal, resolve player actions addressed by name, play the dealer, then
/// settle every hand exactly once with [`Game::payout_results`].
#[derive(Debug)]
pub struct Game {
    dealer: Dealer,
    players: Vec<Player>,
    shoe: Shoe,
    round: usize,
}

impl Game {
    /// Creates a new game with the given options and shuffle seed.
    ///
    /// # Example
    ///
    /// ```
    /// use twentyone::{Game, GameOptions};
    ///
    /// let game = Game::new(GameOptions::default().with_decks(6), 42);
    /// assert_eq!(game.shoe().num_decks(), 6);
    /// ```
    #[must_use]
    pub fn new(options: GameOptions, seed: u64) -> Self {
        Self {
            dealer: Dealer::new(),
            players: Vec::new(),
            shoe: Shoe::new(options.decks, seed).with_penetration(options.penetration),
            round: 0,
        }
    }

    /// Seats a new player with the given starting chips.
    pub fn add_player(&mut self, name: &str, chips: usize) {
        self.players.push(Player::new(name, chips));
    }

    /// Seats a new player backed by a custom chip manager.
    pub fn add_player_with_chip_manager(&mut self, name: &str, chips: Box<dyn ChipManager>) {
        self.players.push(Player::with_chip_manager(name, chips));
    }

    /// Returns the player with the given name, if seated.
    #[must_use]
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name() == name)
    }

    /// Returns a mutable reference to the player with the given name.
    pub fn player_mut(&mut self, name: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.name() == name)
    }

    /// Removes the player with the given name, returning whether one was
    /// seated.
    pub fn remove_player(&mut self, name: &str) -> bool {
        let before = self.players.len();
        self.players.retain(|p| p.name() != name);
        self.players.len() != before
    }

    /// Returns all seated players in turn order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Returns the dealer.
    #[must_use]
    pub const fn dealer(&self) -> &Dealer {
        &self.dealer
    }

    /// Returns the shoe.
    #[must_use]
    pub const fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    /// Returns a mutable reference to the shoe, for rigging deterministic
    /// draw sequences in tests and replays.
    pub fn shoe_mut(&mut self) -> &mut Shoe {
        &mut self.shoe
    }

    /// Returns the current round number.
    #[must_use]
    pub const fn round(&self) -> usize {
        self.round
    }

    /// Starts a new round: clears the dealer and every player's hands,
    /// re-activates all players, and reshuffles the shoe if the cut card
    /// was reached.
    pub fn start_new_round(&mut self) {
        self.round += 1;
        debug!(round = self.round, "starting new round");

        self.dealer.clear_hand();
        for player in &mut self.players {
            player.clear_hands();
            player.set_active(true);
        }

        if self.shoe.needs_reshuffle() {
            self.shoe.reshuffle();
        }
    }

    /// Deals two cards to each active player and the dealer: one card each
    /// in turn order, the dealer's up card, a second card each, then the
    /// dealer's hole card.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::Empty`] if the shoe runs out mid-deal. This is
    /// fatal for the round; the shoe is never reshuffled mid-deal.
    pub fn deal_initial_cards(&mut self) -> Result<(), ShoeError> {
        for i in 0..self.players.len() {
            if self.players[i].is_active() {
                let card = self.shoe.draw()?;
                self.players[i].current_hand_mut().deal_card(card);
            }
        }

        let card = self.shoe.draw()?;
        self.dealer.deal_card(card);

        for i in 0..self.players.len() {
            if self.players[i].is_active() {
                let card = self.shoe.draw()?;
                self.players[i].current_hand_mut().deal_card(card);
            }
        }

        let hole = self.shoe.draw()?;
        self.dealer.deal_card(hole);

        Ok(())
    }

    fn playable_player(&self, name: &str) -> Result<usize, GameError> {
        let index = self
            .players
            .iter()
            .position(|p| p.name() == name)
            .ok_or_else(|| GameError::PlayerNotFound(name.to_owned()))?;

        let player = &self.players[index];
        if !player.is_active() {
            return Err(GameError::PlayerNotActive(name.to_owned()));
        }
        if player.is_standing() {
            return Err(GameError::AlreadyStanding(name.to_owned()));
        }
        Ok(index)
    }

    /// Advances the player to their next playable hand, retiring them from
    /// the round when none remains.
    fn advance_or_retire(player: &mut Player) {
        if !player.move_to_next_active_hand() {
            player.set_active(false);
        }
    }

    /// Deals one card to the named player's current hand.
    ///
    /// If the card busts the hand or brings it to 21, the cursor advances to
    /// the player's next playable hand (retiring the player when none
    /// remains).
    ///
    /// # Errors
    ///
    /// Returns a [`GameError`] if the player is missing, inactive, or
    /// already standing, or if the shoe is empty; preconditions are checked
    /// before the shoe is touched.
    pub fn player_hit(&mut self, name: &str) -> Result<(), GameError> {
        let index = self.playable_player(name)?;
        let card = self.shoe.draw().map_err(GameError::Shoe)?;

        let player = &mut self.players[index];
        player.current_hand_mut().hit(card);

        let hand = player.current_hand();
        if hand.is_busted() || hand.value() == 21 {
            Self::advance_or_retire(player);
        }
        Ok(())
    }

    /// Stands the named player's current hand and advances to their next
    /// playable hand, retiring them when none remains.
    ///
    /// # Errors
    ///
    /// Returns a [`GameError`] if the player is missing, inactive, or
    /// already standing.
    pub fn player_stand(&mut self, name: &str) -> Result<(), GameError> {
        let index = self.playable_player(name)?;
        let player = &mut self.players[index];
        player.current_hand_mut().stand();
        Self::advance_or_retire(player);
        Ok(())
    }

    /// Splits the named player's current hand and deals one card to each of
    /// the two resulting hands.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::CannotSplit`] when the split preconditions fail
    /// (leaving all state unchanged), or a shoe error if the follow-up cards
    /// cannot be drawn.
    pub fn player_split(&mut self, name: &str) -> Result<(), GameError> {
        let index = self.playable_player(name)?;
        if !self.players[index].can_split() {
            return Err(GameError::CannotSplit);
        }

        self.players[index].split()?;

        // One card to the split hand, one to the new sibling at the end.
        let card = self.shoe.draw().map_err(GameError::Shoe)?;
        let player = &mut self.players[index];
        player.current_hand_mut().hit(card);

        let card = self.shoe.draw().map_err(GameError::Shoe)?;
        let player = &mut self.players[index];
        let last = player.hands().len() - 1;
        if let Some(hand) = player.hand_mut(last) {
            hand.hit(card);
        }

        Ok(())
    }

    /// Surrenders the named player's current hand, refunding half the bet,
    /// then advances to their next playable hand.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::CannotSurrender`] when the surrender
    /// preconditions fail; no state changes on error.
    pub fn player_surrender(&mut self, name: &str) -> Result<(), GameError> {
        let index = self.playable_player(name)?;
        let player = &mut self.players[index];
        player.surrender()?;
        Self::advance_or_retire(player);
        Ok(())
    }

    /// Doubles down the named player's current hand: doubles the bet, deals
    /// exactly one card, stands the hand, and advances the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::CannotDoubleDown`] (or a bet error) when the
    /// preconditions fail, leaving all state unchanged, or a shoe error if
    /// the single card cannot be drawn.
    pub fn player_double_down_hit(&mut self, name: &str) -> Result<(), GameError> {
        let index = self.playable_player(name)?;
        if !self.players[index].can_double_down() {
            return Err(GameError::CannotDoubleDown);
        }

        self.players[index].double_down()?;

        let card = self.shoe.draw().map_err(GameError::Shoe)?;
        let player = &mut self.players[index];
        let hand = player.current_hand_mut();
        hand.double_down_hit(card);
        hand.stand();
        Self::advance_or_retire(player);

        Ok(())
    }

    /// Plays out the dealer's hand: draws while [`Dealer::should_hit`] says
    /// to, then stands.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::Empty`] if the shoe runs out while the dealer
    /// must draw.
    pub fn dealer_play(&mut self) -> Result<(), ShoeError> {
        while self.dealer.should_hit() {
            let card = self.shoe.draw()?;
            self.dealer.hit(card);
        }
        self.dealer.stand();
        Ok(())
    }

    /// Compares one player hand against the dealer's hand.
    ///
    /// Pure and side-effect free; safe to call for display without
    /// triggering payment.
    #[must_use]
    pub fn evaluate_hand(&self, hand: &Hand) -> Outcome {
        evaluate(hand, self.dealer.hand())
    }

    /// Settles every hand with a bet still at risk, exactly once.
    ///
    /// This is the single authorized settlement call site: each hand's bet
    /// is zeroed as it settles, so hands already settled (or surrendered)
    /// are skipped.
    pub fn payout_results(&mut self) {
        let dealer_hand = self.dealer.hand().clone();

        for player in &mut self.players {
            for index in 0..player.hands().len() {
                if player.hands()[index].bet() == 0 {
                    continue;
                }
                let outcome = evaluate(&player.hands()[index], &dealer_hand);
                player.settle_hand(index, outcome);
            }
        }
    }

    /// Returns whether every active player is standing on their current
    /// hand.
    #[must_use]
    pub fn is_round_complete(&self) -> bool {
        self.players
            .iter()
            .all(|player| !player.is_active() || player.is_standing())
    }

    /// Returns the first active player who has not finished their current
    /// hand, or `None` when turn-taking is over.
    #[must_use]
    pub fn active_player(&self) -> Option<&Player> {
        self.players
            .iter()
            .find(|player| player.is_active() && !player.is_standing())
    }

    /// Renders the table: round number, shoe, dealer (optionally hiding the
    /// hole card), and every player.
    #[must_use]
    pub fn status(&self, show_dealer_hole: bool) -> String {
        let mut status = String::new();

        let _ = writeln!(status, "=== Round {} ===", self.round);
        let _ = writeln!(status, "{}", self.shoe);
        status.push('\n');

        if show_dealer_hole {
            let _ = writeln!(status, "{}", self.dealer);
        } else {
            let _ = writeln!(status, "{}", self.dealer.to_hidden_string());
        }
        status.push('\n');

        for player in &self.players {
            let _ = writeln!(status, "{player}");
        }

        status
    }
}

/// Outcome precedence: both blackjacks push; a lone blackjack outranks
/// everything; busts resolve next; only then are values compared.
fn evaluate(player_hand: &Hand, dealer_hand: &Hand) -> Outcome {
    let player_blackjack = player_hand.is_blackjack();
    let dealer_blackjack = dealer_hand.is_blackjack();

    if player_blackjack && dealer_blackjack {
        return Outcome::Push;
    }
    if player_blackjack {
        return Outcome::PlayerBlackjack;
    }
    if dealer_blackjack {
        return Outcome::DealerBlackjack;
    }
    if player_hand.is_busted() {
        return Outcome::DealerWin;
    }
    if dealer_hand.is_busted() {
        return Outcome::PlayerWin;
    }

    match player_hand.value().cmp(&dealer_hand.value()) {
        core::cmp::Ordering::Greater => Outcome::PlayerWin,
        core::cmp::Ordering::Less => Outcome::DealerWin,
        core::cmp::Ordering::Equal => Outcome::Push,
    }
}
