//! Unit tests for the pure play transition.

use crate::domain::cards::{deck, parse_cards, Card, Suit};
use crate::domain::dealing::{deal, FIRST_TURN};
use crate::domain::state::{GameWinner, TableState};
use crate::domain::tricks::play_card;
use crate::errors::domain::{DomainError, ValidationKind};

fn card(tok: &str) -> Card {
    crate::domain::cards::parse_card_str(tok).unwrap()
}

/// One suit per seat; seat 0 holds every trump and wins all ten tricks.
fn one_suit_each_state() -> TableState {
    let all = deck();
    let by_suit = |s: Suit| -> Vec<Card> { all.iter().copied().filter(|c| c.suit == s).collect() };
    TableState {
        trump: Suit::Spades,
        trick_no: 1,
        turn: FIRST_TURN,
        hands: [
            by_suit(Suit::Spades),
            by_suit(Suit::Hearts),
            by_suit(Suit::Diamonds),
            by_suit(Suit::Clubs),
        ],
        trick_plays: Vec::new(),
        captured: Default::default(),
        score_a: 0,
        score_b: 0,
        finished: false,
    }
}

#[test]
fn turn_rotates_clockwise_until_trick_completes() {
    let mut state = TableState::after_deal(deal(11), FIRST_TURN);
    assert_eq!(state.turn, 1);

    for expected_next in [2u8, 3, 0] {
        let seat = state.turn;
        let card = state.legal_moves_for(seat)[0];
        let outcome = play_card(&mut state, seat, card).unwrap();
        assert!(!outcome.trick_completed);
        assert_eq!(state.turn, expected_next);
    }

    // Fourth play resolves the trick; the winner leads the next one.
    let seat = state.turn;
    let card = state.legal_moves_for(seat)[0];
    let outcome = play_card(&mut state, seat, card).unwrap();
    assert!(outcome.trick_completed);
    let winner = outcome.trick_winner.unwrap();
    assert_eq!(state.turn, winner);
    assert_eq!(state.trick_no, 2);
    assert_eq!(state.captured[winner as usize].len(), 4);
}

#[test]
fn card_leaves_hand_exactly_once() {
    let mut state = TableState::after_deal(deal(3), FIRST_TURN);
    let seat = state.turn;
    let card = state.legal_moves_for(seat)[0];
    let hand_before = state.hands[seat as usize].len();

    play_card(&mut state, seat, card).unwrap();
    assert_eq!(state.hands[seat as usize].len(), hand_before - 1);
    assert!(!state.hands[seat as usize].contains(&card));

    // Replaying the same card is a clean rejection
    let err = play_card(&mut state, seat, card).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::NotYourTurn, _)
            | DomainError::Validation(ValidationKind::CardNotInHand, _)
    ));
}

#[test]
fn must_follow_suit_rejection_is_side_effect_free() {
    let mut state = one_suit_each_state();
    // Seat 1 leads a heart
    play_card(&mut state, 1, card("hearts-2")).unwrap();

    // Seat 2 holds only diamonds: anything goes. Play and land on seat 3.
    play_card(&mut state, 2, card("diamonds-2")).unwrap();

    // Force a follow-suit violation: give seat 3 a heart alongside clubs.
    state.hands[3].push(card("hearts-A"));
    let before = state.clone();
    let err = play_card(&mut state, 3, card("clubs-A")).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::MustFollowSuit, _)
    ));
    assert_eq!(state, before);

    // Following suit is accepted
    play_card(&mut state, 3, card("hearts-A")).unwrap();
}

#[test]
fn trump_holder_sweeps_the_game() {
    let mut state = one_suit_each_state();

    while !state.finished {
        let seat = state.turn;
        let card = state.legal_moves_for(seat)[0];
        play_card(&mut state, seat, card).unwrap();
    }

    // Seat 0 trumped every trick: team A takes all 120 points.
    assert_eq!(state.score_a, 120);
    assert_eq!(state.score_b, 0);
    assert_eq!(state.winner(), Some(GameWinner::TeamA));
    assert_eq!(state.captured[0].len(), 40);
    assert!(state.check_invariants());
}

#[test]
fn finished_game_rejects_further_plays() {
    let mut state = one_suit_each_state();
    while !state.finished {
        let seat = state.turn;
        let card = state.legal_moves_for(seat)[0];
        play_card(&mut state, seat, card).unwrap();
    }
    let err = play_card(&mut state, 0, card("spades-A")).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::GameNotActive, _)
    ));
}

#[test]
fn sixty_sixty_is_a_draw() {
    let mut state = one_suit_each_state();
    state.finished = true;
    state.score_a = 60;
    state.score_b = 60;
    assert_eq!(state.winner(), Some(GameWinner::Draw));
}

#[test]
fn discard_is_legal_only_when_void() {
    let hand = parse_cards(&["hearts-2", "clubs-A"]);
    assert!(!crate::domain::rules::is_legal(
        card("clubs-A"),
        &hand,
        Some(Suit::Hearts)
    ));
    let void_hand = parse_cards(&["clubs-A", "diamonds-K"]);
    assert!(crate::domain::rules::is_legal(
        card("clubs-A"),
        &void_hand,
        Some(Suit::Hearts)
    ));
}
