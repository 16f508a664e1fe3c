//! Dealing: seeded shuffle of a fresh 40-card deck into four 10-card hands.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::domain::cards::{deck, Card, Suit};
use crate::domain::rules::{HAND_SIZE, SEATS};

/// The seat that plays first after a deal (left of the dealing host).
pub const FIRST_TURN: u8 = 1;

/// Outcome of dealing a fresh deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    /// 10 cards per seat, indexed by position.
    pub hands: [Vec<Card>; 4],
    /// Trump is the suit of seat 0's last card (index 9 of the shuffle).
    /// It is derived from the shuffle, never randomized separately.
    pub trump: Suit,
}

/// Shuffle a fresh deck with a ChaCha20 stream seeded from `seed` and assign
/// contiguous 10-card slices in position order (seat 0 gets indices 0..10,
/// seat 1 gets 10..20, ...). The seed is persisted by the caller so a deal
/// can be reproduced for audit.
pub fn deal(seed: u64) -> Deal {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut cards = deck();
    cards.shuffle(&mut rng);

    let trump = cards[HAND_SIZE - 1].suit;

    let mut hands: [Vec<Card>; 4] = Default::default();
    for (pos, hand) in hands.iter_mut().enumerate().take(SEATS) {
        hand.extend_from_slice(&cards[pos * HAND_SIZE..(pos + 1) * HAND_SIZE]);
    }

    Deal { hands, trump }
}
