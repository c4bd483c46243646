//! The hand state machine: cards, derived value, lifecycle flags, per-hand
//! betting, and the append-only action log.

use core::fmt;
use std::time::SystemTime;

use crate::card::Card;
use crate::chips::ChipManager;
use crate::error::{BetError, GameError};

/// Maximum number of hands a player may hold after splitting.
pub const MAX_HANDS: usize = 4;

const fn card_value(rank: u8) -> u8 {
    match rank {
        1 => 11,
        2..=10 => rank,
        11..=13 => 10,
        _ => 0,
    }
}

/// Returns the best blackjack value of the cards and whether the hand is
/// soft. Aces count 11 first; one ace at a time is demoted to 1 while the
/// total busts.
fn evaluate_cards(cards: &[Card]) -> (u8, bool) {
    let mut value: u8 = 0;
    let mut aces: u8 = 0;

    for card in cards {
        if card.rank == 1 {
            aces += 1;
        }
        value = value.saturating_add(card_value(card.rank));
    }

    while value > 21 && aces > 0 {
        value -= 10;
        aces -= 1;
    }

    let is_soft = aces > 0 && value <= 21;
    (value, is_soft)
}

/// The kind of action recorded in a hand's audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Card received during the initial deal (or as a split card).
    Deal,
    /// Card drawn on request.
    Hit,
    /// The hand stood.
    Stand,
    /// The bet was doubled, or the one double-down card arrived.
    Double,
    /// The hand was split.
    Split,
    /// The hand was surrendered.
    Surrender,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Deal => "deal",
            Self::Hit => "hit",
            Self::Stand => "stand",
            Self::Double => "double",
            Self::Split => "split",
            Self::Surrender => "surrender",
        };
        f.write_str(name)
    }
}

/// One entry in a hand's append-only action log.
///
/// The log exists purely for audit and display; no rule ever consults it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// What happened.
    pub kind: ActionKind,
    /// Card involved, for deal/hit/double entries.
    pub card: Option<Card>,
    /// When the action was recorded.
    pub timestamp: SystemTime,
    /// Free-text detail about the action.
    pub detail: String,
}

/// A hand of cards, the atomic unit of play.
///
/// A hand tracks its own lifecycle (active, stood, surrendered, or busted by
/// value), its bet and signed winnings, and an ordered log of everything that
/// happened to it. All chip movement for betting, doubling, splitting,
/// surrendering, and settlement goes through the methods here, against a
/// caller-supplied [`ChipManager`].
#[derive(Debug, Clone)]
pub struct Hand {
    cards: Vec<Card>,
    is_split: bool,
    is_active: bool,
    is_stood: bool,
    is_surrendered: bool,
    bet: usize,
    winnings: isize,
    actions: Vec<Action>,
}

impl Hand {
    /// Creates a new empty, active hand with no bet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            is_split: false,
            is_active: true,
            is_stood: false,
            is_surrendered: false,
            bet: 0,
            winnings: 0,
            actions: Vec::new(),
        }
    }

    fn record(&mut self, kind: ActionKind, card: Option<Card>, detail: &str) {
        self.actions.push(Action {
            kind,
            card,
            timestamp: SystemTime::now(),
            detail: detail.to_owned(),
        });
    }

    /// Adds a card as part of the initial deal.
    pub fn deal_card(&mut self, card: Card) {
        self.cards.push(card);
        self.record(ActionKind::Deal, Some(card), "initial deal");
    }

    /// Adds a card on a player's hit request.
    pub fn hit(&mut self, card: Card) {
        self.cards.push(card);
        self.record(ActionKind::Hit, Some(card), "player hit");
    }

    /// Adds the single card a doubled-down hand receives.
    pub fn double_down_hit(&mut self, card: Card) {
        self.cards.push(card);
        self.record(ActionKind::Double, Some(card), "double down card");
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand holds no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Calculates the value of the hand.
    ///
    /// Aces are counted as 11 if possible without busting, otherwise as 1.
    #[must_use]
    pub fn value(&self) -> u8 {
        evaluate_cards(&self.cards).0
    }

    /// Returns whether the hand value is over 21.
    #[must_use]
    pub fn is_busted(&self) -> bool {
        self.value() > 21
    }

    /// Returns whether the hand is a natural blackjack: exactly two cards
    /// totaling 21 on a hand that is not the product of a split.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.value() == 21 && !self.is_split
    }

    /// Returns whether the hand is soft (an ace is still counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        evaluate_cards(&self.cards).1
    }

    /// Returns whether this hand was created by a split.
    #[must_use]
    pub const fn is_split(&self) -> bool {
        self.is_split
    }

    /// Returns whether this hand is still being played.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns whether the hand has stood.
    #[must_use]
    pub const fn is_stood(&self) -> bool {
        self.is_stood
    }

    /// Returns whether the hand has been surrendered.
    #[must_use]
    pub const fn is_surrendered(&self) -> bool {
        self.is_surrendered
    }

    /// Marks the hand as stood. Terminal for this hand.
    pub fn stand(&mut self) {
        self.is_stood = true;
        self.is_active = false;
        self.record(ActionKind::Stand, None, "");
    }

    /// Resets cards, flags, bet, winnings, and the action log for a new round.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.is_split = false;
        self.is_active = true;
        self.is_stood = false;
        self.is_surrendered = false;
        self.bet = 0;
        self.winnings = 0;
        self.actions.clear();
    }

    /// Returns the amount currently at risk on this hand (zero once settled).
    #[must_use]
    pub const fn bet(&self) -> usize {
        self.bet
    }

    /// Returns the signed winnings recorded at settlement (negative for a
    /// net loss). Informational only.
    #[must_use]
    pub const fn winnings(&self) -> isize {
        self.winnings
    }

    /// Places a bet on this hand, deducting the amount from `chips`.
    ///
    /// # Errors
    ///
    /// Returns [`BetError::NonPositiveBet`] for a zero amount, or
    /// [`BetError::InsufficientChips`] if the balance cannot cover it; the
    /// hand and balance are unchanged on error.
    pub fn place_bet(&mut self, amount: usize, chips: &mut dyn ChipManager) -> Result<(), BetError> {
        if amount == 0 {
            return Err(BetError::NonPositiveBet);
        }
        chips.deduct_chips(amount)?;
        self.bet = amount;
        Ok(())
    }

    /// Settles the hand as a win: pays back `bet * (1 + multiplier)` and
    /// records `bet * multiplier` as winnings. Use a multiplier of 1.0 for a
    /// normal win and 1.5 for a blackjack.
    pub fn win_bet(&mut self, multiplier: f64, chips: &mut dyn ChipManager) {
        let winnings = (self.bet as f64 * multiplier) as usize;
        chips.add_chips(self.bet + winnings);
        self.winnings = winnings as isize;
        self.bet = 0;
    }

    /// Settles the hand as a loss. The bet was already deducted when placed,
    /// so only the loss is recorded.
    pub fn lose_bet(&mut self) {
        self.winnings = -(self.bet as isize);
        self.bet = 0;
    }

    /// Settles the hand as a push, returning the bet to `chips`.
    pub fn push_bet(&mut self, chips: &mut dyn ChipManager) {
        chips.add_chips(self.bet);
        self.winnings = 0;
        self.bet = 0;
    }

    /// Returns whether the hand can double down: exactly two cards and
    /// enough chips to match the current bet.
    #[must_use]
    pub fn can_double_down(&self, chips: &dyn ChipManager) -> bool {
        self.cards.len() == 2 && chips.has_enough_chips(self.bet)
    }

    /// Doubles the bet, deducting a matching amount from `chips`.
    ///
    /// This does not draw a card or stand the hand; the orchestrator deals
    /// exactly one more card and then stands it.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::CannotDoubleDown`] unless the hand has exactly
    /// two cards, or a [`BetError`] if the chips cannot cover the raise; no
    /// state changes on error.
    pub fn double_down(&mut self, chips: &mut dyn ChipManager) -> Result<(), GameError> {
        if self.cards.len() != 2 {
            return Err(GameError::CannotDoubleDown);
        }
        chips.deduct_chips(self.bet).map_err(GameError::Bet)?;
        self.bet *= 2;
        let detail = format!("bet increased from {} to {}", self.bet / 2, self.bet);
        self.record(ActionKind::Double, None, &detail);
        Ok(())
    }

    /// Returns whether the hand can split: a two-card pair of equal rank,
    /// fewer than [`MAX_HANDS`] hands held by the owner, and enough chips to
    /// duplicate the bet.
    #[must_use]
    pub fn can_split(&self, hand_count: usize, chips: &dyn ChipManager) -> bool {
        hand_count < MAX_HANDS
            && self.cards.len() == 2
            && self.cards[0].rank == self.cards[1].rank
            && chips.has_enough_chips(self.bet)
    }

    /// Splits the hand, moving the second card into a new sibling hand with
    /// the same bet. Both hands are marked as split; the matching bet is
    /// deducted from `chips`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::CannotSplit`] if the hand is not a two-card pair
    /// or the owner already holds [`MAX_HANDS`] hands, or a [`BetError`] if
    /// the chips cannot cover the duplicate bet; no state changes on error.
    #[expect(
        clippy::missing_panics_doc,
        reason = "the two-card precondition is validated before the pop"
    )]
    pub fn split(
        &mut self,
        hand_count: usize,
        chips: &mut dyn ChipManager,
    ) -> Result<Self, GameError> {
        if hand_count >= MAX_HANDS
            || self.cards.len() != 2
            || self.cards[0].rank != self.cards[1].rank
        {
            return Err(GameError::CannotSplit);
        }
        chips.deduct_chips(self.bet).map_err(GameError::Bet)?;

        let detail = format!("split into {} hands", hand_count + 1);
        self.record(ActionKind::Split, None, &detail);

        let second = self
            .cards
            .pop()
            .expect("hand has exactly two cards, validated above");
        self.is_split = true;

        let mut sibling = Self::new();
        sibling.is_split = true;
        sibling.bet = self.bet;
        sibling.cards.push(second);
        sibling.record(ActionKind::Deal, Some(second), "split card");
        sibling.record(ActionKind::Split, None, "created from split");

        Ok(sibling)
    }

    /// Returns whether the hand can surrender: the owner holds only this
    /// hand, it has exactly two cards, and it is neither stood nor busted.
    #[must_use]
    pub fn can_surrender(&self, hand_count: usize) -> bool {
        hand_count == 1 && self.cards.len() == 2 && !self.is_stood && !self.is_busted()
    }

    /// Surrenders the hand: half the bet goes back to `chips`, the other
    /// half is recorded as a loss, the bet is zeroed, and the hand stands.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::CannotSurrender`] unless the owner holds only
    /// this hand and it is an untouched two-card hand; no state changes on
    /// error.
    pub fn surrender(
        &mut self,
        hand_count: usize,
        chips: &mut dyn ChipManager,
    ) -> Result<(), GameError> {
        if !self.can_surrender(hand_count) {
            return Err(GameError::CannotSurrender);
        }

        let half = self.bet / 2;
        chips.add_chips(half);
        self.winnings = -(half as isize);
        self.bet = 0;
        self.is_surrendered = true;
        let detail = format!("received {half} chips back");
        self.record(ActionKind::Surrender, None, &detail);
        self.stand();
        Ok(())
    }

    /// Returns a copy-free view of every action taken on this hand, in order.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Returns a one-line summary of the action log, e.g.
    /// `"dealt Ace of Hearts (initial deal), hit 5 of Clubs (player hit), stand"`.
    #[must_use]
    pub fn action_summary(&self) -> String {
        if self.actions.is_empty() {
            return "No actions".to_owned();
        }

        let mut summary = String::new();
        for (i, action) in self.actions.iter().enumerate() {
            if i > 0 {
                summary.push_str(", ");
            }

            match (action.kind, action.card) {
                (ActionKind::Deal, Some(card)) => {
                    summary.push_str(&format!("dealt {card}"));
                }
                (ActionKind::Deal, None) => summary.push_str("dealt"),
                (ActionKind::Hit, Some(card)) => summary.push_str(&format!("hit {card}")),
                (ActionKind::Double, Some(card)) => {
                    summary.push_str(&format!("double {card}"));
                }
                (kind, _) => summary.push_str(&kind.to_string()),
            }

            if !action.detail.is_empty() {
                summary.push_str(" (");
                summary.push_str(&action.detail);
                summary.push(')');
            }
        }

        summary
    }

    /// Renders the hand with the hole card (second card) hidden, for
    /// displaying the dealer before their turn.
    #[must_use]
    pub fn to_hidden_string(&self) -> String {
        if self.cards.is_empty() {
            return "Empty hand".to_owned();
        }
        if self.cards.len() == 1 {
            let (value, _) = evaluate_cards(&self.cards);
            return format!("[{}] (Visible Value: {value})", self.cards[0]);
        }

        let visible: Vec<String> = self.cards[..self.cards.len() - 1]
            .iter()
            .map(ToString::to_string)
            .chain(std::iter::once("Hidden".to_owned()))
            .collect();
        let (value, _) = evaluate_cards(&self.cards[..self.cards.len() - 1]);
        format!("[{}] (Visible Value: {value})", visible.join(", "))
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cards.is_empty() {
            return f.write_str("Empty hand");
        }

        let cards: Vec<String> = self.cards.iter().map(ToString::to_string).collect();
        let split_text = if self.is_split { " (Split)" } else { "" };
        write!(
            f,
            "[{}] (Value: {}){}",
            cards.join(", "),
            self.value(),
            split_text
        )
    }
}
