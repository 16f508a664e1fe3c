//! Core Sueca table rules: seat/team layout, suit following, trick
//! resolution, and the scoring thresholds.

use crate::domain::cards::{card_beats, hand_has_suit, Card, Suit};

pub const SEATS: usize = 4;
pub const HAND_SIZE: usize = 10;
pub const TRICKS_PER_GAME: u8 = 10;
pub const TOTAL_POINTS: u8 = 120;
/// A team wins outright with 61 of the 120 points.
pub const WIN_THRESHOLD: u8 = 61;

/// Seat positions are fixed at join time. Partners sit opposite:
/// 0 & 2 form team A, 1 & 3 form team B.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Team {
    A,
    B,
}

impl Team {
    pub fn for_position(position: u8) -> Team {
        if position % 2 == 0 {
            Team::A
        } else {
            Team::B
        }
    }

    pub fn positions(&self) -> [u8; 2] {
        match self {
            Team::A => [0, 2],
            Team::B => [1, 3],
        }
    }
}

pub fn next_seat(position: u8) -> u8 {
    (position + 1) % SEATS as u8
}

/// Whether `card` is a legal play from `hand` against an optional lead suit.
///
/// With no lead (first play of a trick) any card is legal. With a lead, the
/// player must follow suit while able; discarding ("baldar") is allowed only
/// when the hand is void in the lead suit. There is no obligation to trump.
pub fn is_legal(card: Card, hand: &[Card], lead: Option<Suit>) -> bool {
    let Some(lead) = lead else {
        return true;
    };
    if card.suit == lead {
        return true;
    }
    !hand_has_suit(hand, lead)
}

/// Legal cards from `hand` against an optional lead suit, sorted for
/// deterministic presentation.
pub fn legal_moves(hand: &[Card], lead: Option<Suit>) -> Vec<Card> {
    let mut v: Vec<Card> = hand
        .iter()
        .copied()
        .filter(|&c| is_legal(c, hand, lead))
        .collect();
    v.sort();
    v
}

/// Winner of a completed trick: the strongest trump played, or the strongest
/// card of the led suit when no trump was played. The lead suit is the suit
/// of the first play; ties are impossible in a 40-unique-card deck.
///
/// Returns the winning seat position. Panics are avoided by construction:
/// callers pass exactly the trick's plays, never an empty slice.
pub fn trick_winner(plays: &[(u8, Card)], trump: Suit) -> Option<u8> {
    let (_, first_card) = *plays.first()?;
    let lead = first_card.suit;

    let mut best = 0usize;
    for i in 1..plays.len() {
        if card_beats(plays[i].1, plays[best].1, lead, trump) {
            best = i;
        }
    }
    Some(plays[best].0)
}

/// Total point value of the cards in a trick.
pub fn trick_points(plays: &[(u8, Card)]) -> u8 {
    plays.iter().map(|(_, c)| c.point_value()).sum()
}
