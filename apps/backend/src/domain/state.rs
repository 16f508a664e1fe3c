//! In-memory table state for the trick-play phase.
//!
//! The authoritative copy of this state lives in the database (seat hands,
//! the append-only move log, and the table row). Services rebuild a
//! `TableState` from those rows inside a transaction, apply the pure
//! transition in [`crate::domain::tricks`], and persist the result. The same
//! transition serves human submissions and watchdog autoplay.

use crate::domain::cards::{Card, Suit};
use crate::domain::dealing::Deal;
use crate::domain::rules::{legal_moves, Team, TOTAL_POINTS, WIN_THRESHOLD};

/// Terminal result of a finished game.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GameWinner {
    TeamA,
    TeamB,
    /// 60-60. Settled as a full refund of every stake, no rake.
    Draw,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    pub trump: Suit,
    /// 1..=10.
    pub trick_no: u8,
    /// Seat position to act next. Meaningless once `finished`.
    pub turn: u8,
    /// Hidden hands, indexed by seat position.
    pub hands: [Vec<Card>; 4],
    /// Plays of the trick in progress, in play order.
    pub trick_plays: Vec<(u8, Card)>,
    /// Captured cards per seat (audit trail; the trick winner takes all 4).
    pub captured: [Vec<Card>; 4],
    pub score_a: u8,
    pub score_b: u8,
    pub finished: bool,
}

impl TableState {
    pub fn after_deal(deal: Deal, first_turn: u8) -> Self {
        Self {
            trump: deal.trump,
            trick_no: 1,
            turn: first_turn,
            hands: deal.hands,
            trick_plays: Vec::new(),
            captured: Default::default(),
            score_a: 0,
            score_b: 0,
            finished: false,
        }
    }

    /// Suit of the first card played into the current trick, if any.
    pub fn lead_suit(&self) -> Option<Suit> {
        self.trick_plays.first().map(|(_, c)| c.suit)
    }

    pub fn legal_moves_for(&self, seat: u8) -> Vec<Card> {
        legal_moves(&self.hands[seat as usize], self.lead_suit())
    }

    pub fn score_for(&self, team: Team) -> u8 {
        match team {
            Team::A => self.score_a,
            Team::B => self.score_b,
        }
    }

    pub fn add_score(&mut self, team: Team, points: u8) {
        match team {
            Team::A => self.score_a += points,
            Team::B => self.score_b += points,
        }
    }

    /// Game result once finished; `None` while play continues.
    pub fn winner(&self) -> Option<GameWinner> {
        if !self.finished {
            return None;
        }
        if self.score_a >= WIN_THRESHOLD {
            Some(GameWinner::TeamA)
        } else if self.score_b >= WIN_THRESHOLD {
            Some(GameWinner::TeamB)
        } else {
            Some(GameWinner::Draw)
        }
    }

    /// Cards in hands, captured piles, and the open trick always total 40,
    /// and team scores never exceed the 120 deck points.
    pub fn check_invariants(&self) -> bool {
        let in_hands: usize = self.hands.iter().map(Vec::len).sum();
        let captured: usize = self.captured.iter().map(Vec::len).sum();
        let in_trick = self.trick_plays.len();
        in_hands + captured + in_trick == 40
            && self.score_a as u16 + self.score_b as u16 <= TOTAL_POINTS as u16
    }
}
