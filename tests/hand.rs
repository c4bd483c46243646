//! Hand, player, dealer, and chip-manager unit tests.

use twentyone::{
    BetError, Card, ChipManager, Dealer, DefaultChipManager, GameError, Hand, Player, Suit,
};

const fn card(suit: Suit, rank: u8) -> Card {
    Card::new(suit, rank)
}

fn hand_of(ranks: &[u8]) -> Hand {
    let mut hand = Hand::new();
    for &rank in ranks {
        hand.deal_card(card(Suit::Hearts, rank));
    }
    hand
}

#[test]
fn value_demotes_aces_to_best_total() {
    assert_eq!(hand_of(&[1, 13]).value(), 21);
    assert_eq!(hand_of(&[1, 1]).value(), 12);
    assert_eq!(hand_of(&[1, 1, 9]).value(), 21);
    assert_eq!(hand_of(&[1, 9, 9]).value(), 19);
    assert_eq!(hand_of(&[1, 1, 1, 13, 9]).value(), 22);
    assert_eq!(hand_of(&[2, 3, 4]).value(), 9);
    assert_eq!(hand_of(&[11, 12, 13]).value(), 30);
}

#[test]
fn softness_tracks_an_ace_counted_as_eleven() {
    assert!(hand_of(&[1, 6]).is_soft());
    assert!(hand_of(&[1, 1]).is_soft());
    assert!(hand_of(&[1, 3, 5]).is_soft());
    assert!(!hand_of(&[1, 9, 9]).is_soft());
    assert!(!hand_of(&[10, 7]).is_soft());
}

#[test]
fn busted_and_blackjack_flags() {
    assert!(hand_of(&[10, 10, 5]).is_busted());
    assert!(!hand_of(&[10, 10]).is_busted());
    assert!(hand_of(&[1, 12]).is_blackjack());
    assert!(!hand_of(&[1, 5, 5]).is_blackjack());
    assert!(!hand_of(&[10, 10]).is_blackjack());
}

#[test]
fn split_hands_never_count_as_blackjack() {
    let mut chips = DefaultChipManager::new(100);
    let mut hand = hand_of(&[1, 1]);
    hand.place_bet(10, &mut chips).unwrap();

    let mut sibling = hand.split(1, &mut chips).unwrap();
    assert!(hand.is_split());
    assert!(sibling.is_split());
    assert_eq!(sibling.bet(), 10);
    assert_eq!(chips.chips(), 80);

    hand.hit(card(Suit::Spades, 13));
    sibling.hit(card(Suit::Clubs, 13));
    assert_eq!(hand.value(), 21);
    assert_eq!(sibling.value(), 21);
    assert!(!hand.is_blackjack());
    assert!(!sibling.is_blackjack());
}

#[test]
fn split_preconditions_are_distinct_errors() {
    let mut chips = DefaultChipManager::new(100);

    let mut not_pair = hand_of(&[8, 9]);
    not_pair.place_bet(10, &mut chips).unwrap();
    assert!(matches!(
        not_pair.split(1, &mut chips),
        Err(GameError::CannotSplit)
    ));

    let mut at_limit = hand_of(&[8, 8]);
    at_limit.place_bet(10, &mut chips).unwrap();
    assert!(matches!(
        at_limit.split(4, &mut chips),
        Err(GameError::CannotSplit)
    ));

    let mut broke_chips = DefaultChipManager::new(50);
    let mut pair = hand_of(&[8, 8]);
    pair.place_bet(50, &mut broke_chips).unwrap();
    assert!(matches!(
        pair.split(1, &mut broke_chips),
        Err(GameError::Bet(BetError::InsufficientChips { .. }))
    ));
    assert_eq!(pair.count(), 2);
    assert!(!pair.is_split());
}

#[test]
fn settlement_primitives_conserve_chips_and_zero_the_bet() {
    let mut chips = DefaultChipManager::new(1000);

    let mut win = hand_of(&[10, 9]);
    win.place_bet(100, &mut chips).unwrap();
    assert_eq!(chips.chips(), 900);
    win.win_bet(1.0, &mut chips);
    assert_eq!(chips.chips(), 1100);
    assert_eq!(win.winnings(), 100);
    assert_eq!(win.bet(), 0);

    let mut blackjack = hand_of(&[1, 13]);
    blackjack.place_bet(100, &mut chips).unwrap();
    blackjack.win_bet(1.5, &mut chips);
    assert_eq!(chips.chips(), 1250);
    assert_eq!(blackjack.winnings(), 150);

    let mut push = hand_of(&[10, 8]);
    push.place_bet(100, &mut chips).unwrap();
    push.push_bet(&mut chips);
    assert_eq!(chips.chips(), 1250);
    assert_eq!(push.winnings(), 0);

    let mut lose = hand_of(&[10, 6]);
    lose.place_bet(100, &mut chips).unwrap();
    lose.lose_bet();
    assert_eq!(chips.chips(), 1150);
    assert_eq!(lose.winnings(), -100);
    assert_eq!(lose.bet(), 0);
}

#[test]
fn odd_amounts_truncate_like_table_payouts() {
    let mut chips = DefaultChipManager::new(100);

    // 3:2 on an odd bet rounds the winnings down.
    let mut hand = hand_of(&[1, 13]);
    hand.place_bet(5, &mut chips).unwrap();
    hand.win_bet(1.5, &mut chips);
    assert_eq!(hand.winnings(), 7);
    assert_eq!(chips.chips(), 107);

    // Surrender refunds the truncated half.
    let mut chips = DefaultChipManager::new(100);
    let mut hand = hand_of(&[10, 6]);
    hand.place_bet(5, &mut chips).unwrap();
    hand.surrender(1, &mut chips).unwrap();
    assert_eq!(chips.chips(), 97);
    assert_eq!(hand.winnings(), -2);
    assert_eq!(hand.bet(), 0);
    assert!(hand.is_surrendered());
    assert!(hand.is_stood());
}

#[test]
fn surrender_primitive_validates_preconditions() {
    let mut chips = DefaultChipManager::new(100);

    // Three cards.
    let mut hit_hand = hand_of(&[5, 6, 4]);
    hit_hand.place_bet(10, &mut chips).unwrap();
    assert!(matches!(
        hit_hand.surrender(1, &mut chips),
        Err(GameError::CannotSurrender)
    ));
    assert_eq!(hit_hand.bet(), 10);
    assert_eq!(chips.chips(), 90);
    assert!(!hit_hand.is_surrendered());

    // More than one hand held by the owner.
    let mut split_hand = hand_of(&[10, 6]);
    split_hand.place_bet(10, &mut chips).unwrap();
    assert!(matches!(
        split_hand.surrender(2, &mut chips),
        Err(GameError::CannotSurrender)
    ));

    // Already stood.
    let mut stood = hand_of(&[10, 6]);
    stood.place_bet(10, &mut chips).unwrap();
    stood.stand();
    assert!(matches!(
        stood.surrender(1, &mut chips),
        Err(GameError::CannotSurrender)
    ));
}

#[test]
fn double_down_primitive_only_moves_chips() {
    let mut chips = DefaultChipManager::new(300);
    let mut hand = hand_of(&[6, 5]);
    hand.place_bet(100, &mut chips).unwrap();

    assert!(hand.can_double_down(&chips));
    hand.double_down(&mut chips).unwrap();
    assert_eq!(hand.bet(), 200);
    assert_eq!(chips.chips(), 100);
    assert_eq!(hand.count(), 2);
    assert!(hand.is_active());

    // Three cards can no longer double.
    hand.hit(card(Suit::Clubs, 4));
    assert!(matches!(
        hand.double_down(&mut chips),
        Err(GameError::CannotDoubleDown)
    ));
    assert_eq!(hand.bet(), 200);
}

#[test]
fn clear_resets_the_whole_hand() {
    let mut chips = DefaultChipManager::new(100);
    let mut hand = hand_of(&[10, 6]);
    hand.place_bet(10, &mut chips).unwrap();
    hand.stand();

    hand.clear();
    assert!(hand.is_empty());
    assert!(hand.is_active());
    assert!(!hand.is_stood());
    assert!(!hand.is_split());
    assert_eq!(hand.bet(), 0);
    assert_eq!(hand.winnings(), 0);
    assert!(hand.actions().is_empty());
    assert_eq!(hand.action_summary(), "No actions");
}

#[test]
fn hand_display_shows_cards_value_and_split_marker() {
    let hand = hand_of(&[1, 13]);
    assert_eq!(
        hand.to_string(),
        "[Ace of Hearts, King of Hearts] (Value: 21)"
    );

    let mut chips = DefaultChipManager::new(100);
    let mut pair = hand_of(&[8, 8]);
    pair.place_bet(10, &mut chips).unwrap();
    let _ = pair.split(1, &mut chips).unwrap();
    assert!(pair.to_string().ends_with("(Split)"));

    assert_eq!(Hand::new().to_string(), "Empty hand");
}

#[test]
fn hidden_rendering_masks_the_hole_card() {
    let hand = hand_of(&[10, 9]);
    let hidden = hand.to_hidden_string();
    assert!(hidden.contains("10 of Hearts"));
    assert!(hidden.contains("Hidden"));
    assert!(hidden.contains("Visible Value: 10"));
    assert!(!hidden.contains('9'));
}

#[test]
fn dealer_decision_table() {
    let mut dealer = Dealer::new();
    dealer.deal_card(card(Suit::Hearts, 10));
    dealer.deal_card(card(Suit::Clubs, 6));
    assert!(dealer.should_hit()); // hard 16

    dealer.hit(card(Suit::Spades, 10));
    assert!(!dealer.should_hit()); // busted

    let mut dealer = Dealer::new();
    dealer.deal_card(card(Suit::Hearts, 10));
    dealer.deal_card(card(Suit::Clubs, 7));
    assert!(!dealer.should_hit()); // hard 17

    let mut dealer = Dealer::new();
    dealer.deal_card(card(Suit::Hearts, 1));
    dealer.deal_card(card(Suit::Clubs, 6));
    assert!(dealer.should_hit()); // soft 17

    dealer.hit(card(Suit::Spades, 1));
    assert!(!dealer.should_hit()); // soft 18
}

#[test]
fn player_cursor_skips_finished_hands() {
    let mut player = Player::new("Alice", 1000);
    player.current_hand_mut().deal_card(card(Suit::Spades, 8));
    player.current_hand_mut().deal_card(card(Suit::Hearts, 8));
    player.place_bet(100).unwrap();

    player.split().unwrap();
    player.current_hand_mut().deal_card(card(Suit::Diamonds, 8));
    player.hand_mut(1).unwrap().deal_card(card(Suit::Clubs, 2));
    player.split().unwrap();
    assert_eq!(player.hands().len(), 3);
    assert_eq!(player.chips(), 700);

    // Bust the second hand; the cursor should jump straight to the third.
    for c in [card(Suit::Clubs, 10), card(Suit::Diamonds, 10)] {
        player.hand_mut(1).unwrap().hit(c);
    }
    player.current_hand_mut().stand();
    assert!(player.move_to_next_active_hand());
    assert_eq!(player.current_hand_index(), 2);
    assert!(!player.move_to_next_active_hand());
    assert_eq!(player.current_hand_index(), 2);
}

#[test]
fn has_active_hands_looks_from_the_cursor_onward() {
    let mut player = Player::new("Alice", 1000);
    player.current_hand_mut().deal_card(card(Suit::Spades, 10));
    player.current_hand_mut().deal_card(card(Suit::Hearts, 7));
    assert!(player.has_active_hands());

    player.current_hand_mut().stand();
    assert!(!player.has_active_hands());

    player.set_active(false);
    assert!(!player.has_active_hands());
    assert!(player.is_standing());
}

#[test]
fn clear_hands_returns_to_a_single_fresh_hand() {
    let mut player = Player::new("Alice", 1000);
    player.current_hand_mut().deal_card(card(Suit::Spades, 8));
    player.current_hand_mut().deal_card(card(Suit::Hearts, 8));
    player.place_bet(100).unwrap();
    player.split().unwrap();
    assert_eq!(player.hands().len(), 2);

    player.clear_hands();
    assert_eq!(player.hands().len(), 1);
    assert_eq!(player.current_hand_index(), 0);
    assert!(player.current_hand().is_empty());
    assert_eq!(player.current_hand().bet(), 0);
}

#[test]
fn default_chip_manager_checks_before_deducting() {
    let mut chips = DefaultChipManager::new(50);
    assert!(chips.has_enough_chips(50));
    assert!(!chips.has_enough_chips(51));

    assert_eq!(
        chips.deduct_chips(60).unwrap_err(),
        BetError::InsufficientChips { have: 50, need: 60 }
    );
    assert_eq!(chips.chips(), 50);

    chips.deduct_chips(20).unwrap();
    chips.add_chips(5);
    assert_eq!(chips.chips(), 35);

    chips.set_chips(200);
    assert_eq!(chips.chips(), 200);
}
