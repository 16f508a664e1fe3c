//! Public snapshot of a table without exposing hidden hands.
//!
//! The snapshot is the reconciliation surface: after any rejected action a
//! client refetches it and redraws. Hidden hands are reduced to counts; the
//! requesting player's own hand is attached only for their seat.

use serde::{Deserialize, Serialize};

use crate::domain::cards::Card;
use crate::domain::rules::Team;

/// Public info about one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatPublic {
    pub position: u8,
    pub user_id: i64,
    pub team: String,
    pub hand_count: u8,
    pub captured_count: u8,
}

/// One card on the table in the trick in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayPublic {
    pub seat: u8,
    pub card: Card,
}

/// Authoritative public view of a table, plus the caller's own hand when
/// they are seated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub table_id: i64,
    pub status: String,
    pub stake: i64,
    pub version: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trump: Option<String>,
    pub current_trick: u8,
    pub current_turn: u8,
    pub score_a: u8,
    pub score_b: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    /// Unix milliseconds; absent when no turn clock is running.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turn_deadline_ms: Option<i64>,
    pub seats: Vec<SeatPublic>,
    pub trick_plays: Vec<PlayPublic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub your_position: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub your_hand: Option<Vec<Card>>,
}

pub fn team_label(position: u8) -> String {
    match Team::for_position(position) {
        Team::A => "A".to_string(),
        Team::B => "B".to_string(),
    }
}
