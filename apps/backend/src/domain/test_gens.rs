//! Proptest generators for domain tests.

use proptest::prelude::*;

use crate::domain::cards::{deck, Card, Rank, Suit};

pub fn suit() -> impl Strategy<Value = Suit> {
    prop::sample::select(Suit::ALL.to_vec())
}

pub fn rank() -> impl Strategy<Value = Rank> {
    prop::sample::select(Rank::ALL.to_vec())
}

pub fn card() -> impl Strategy<Value = Card> {
    (suit(), rank()).prop_map(|(suit, rank)| Card { suit, rank })
}

/// A hand of 1..=10 distinct cards drawn from the deck.
pub fn hand() -> impl Strategy<Value = Vec<Card>> {
    prop::sample::subsequence(deck(), 1..=10)
}

/// A hand guaranteed void in `void_suit`.
pub fn hand_without_suit(void_suit: Suit) -> impl Strategy<Value = Vec<Card>> {
    let pool: Vec<Card> = deck().into_iter().filter(|c| c.suit != void_suit).collect();
    prop::sample::subsequence(pool, 1..=10)
}
