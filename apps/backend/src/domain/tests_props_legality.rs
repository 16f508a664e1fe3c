//! Property-based tests for follow-suit legality.

use std::collections::HashSet;

use proptest::prelude::*;

use crate::domain::cards::Card;
use crate::domain::rules::legal_moves;
use crate::domain::test_gens;

proptest! {
    /// With at least one card of the lead suit in hand, every legal play is
    /// of the lead suit, and every lead-suit card is legal.
    #[test]
    fn prop_follow_suit_when_held(
        lead_suit in test_gens::suit(),
        lead_rank in test_gens::rank(),
        other_cards in test_gens::hand(),
    ) {
        let mut hand = vec![Card { suit: lead_suit, rank: lead_rank }];
        for card in other_cards {
            if !hand.contains(&card) {
                hand.push(card);
            }
        }

        let legal = legal_moves(&hand, Some(lead_suit));

        for card in &legal {
            prop_assert_eq!(card.suit, lead_suit);
        }
        let held_of_suit = hand.iter().filter(|c| c.suit == lead_suit).count();
        prop_assert_eq!(legal.len(), held_of_suit);
    }

    /// Void in the lead suit, the whole hand is legal ("baldar").
    #[test]
    fn prop_any_card_when_void((lead_suit, hand) in test_gens::suit().prop_flat_map(|s| {
        (Just(s), test_gens::hand_without_suit(s))
    })) {
        let legal = legal_moves(&hand, Some(lead_suit));
        let mut expected = hand.clone();
        expected.sort();
        prop_assert_eq!(legal, expected);
    }

    /// Legal plays are always a duplicate-free subset of the hand.
    #[test]
    fn prop_legal_plays_subset(
        hand in test_gens::hand(),
        lead in proptest::option::of(test_gens::suit()),
    ) {
        let legal = legal_moves(&hand, lead);
        let set: HashSet<Card> = legal.iter().copied().collect();
        prop_assert_eq!(set.len(), legal.len());
        for card in &legal {
            prop_assert!(hand.contains(card));
        }
    }

    /// No lead suit (first play of a trick) means the whole hand is legal.
    #[test]
    fn prop_leading_play_unconstrained(hand in test_gens::hand()) {
        prop_assert_eq!(legal_moves(&hand, None).len(), hand.len());
    }
}
