use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::cards::Suit;
use crate::domain::state::GameWinner;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "table_status")]
pub enum TableStatus {
    #[sea_orm(string_value = "WAITING")]
    Waiting,
    #[sea_orm(string_value = "PLAYING")]
    Playing,
    /// Trick 10 resolved, payout not yet applied. The watchdog retries
    /// settlement until the table reaches FINISHED.
    #[sea_orm(string_value = "SETTLEMENT_PENDING")]
    SettlementPending,
    #[sea_orm(string_value = "FINISHED")]
    Finished,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "card_suit")]
pub enum CardSuit {
    #[sea_orm(string_value = "CLUBS")]
    Clubs,
    #[sea_orm(string_value = "DIAMONDS")]
    Diamonds,
    #[sea_orm(string_value = "HEARTS")]
    Hearts,
    #[sea_orm(string_value = "SPADES")]
    Spades,
}

impl From<Suit> for CardSuit {
    fn from(s: Suit) -> Self {
        match s {
            Suit::Clubs => CardSuit::Clubs,
            Suit::Diamonds => CardSuit::Diamonds,
            Suit::Hearts => CardSuit::Hearts,
            Suit::Spades => CardSuit::Spades,
        }
    }
}

impl From<CardSuit> for Suit {
    fn from(s: CardSuit) -> Self {
        match s {
            CardSuit::Clubs => Suit::Clubs,
            CardSuit::Diamonds => Suit::Diamonds,
            CardSuit::Hearts => Suit::Hearts,
            CardSuit::Spades => Suit::Spades,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "winner_team")]
pub enum WinnerTeam {
    #[sea_orm(string_value = "TEAM_A")]
    TeamA,
    #[sea_orm(string_value = "TEAM_B")]
    TeamB,
    #[sea_orm(string_value = "DRAW")]
    Draw,
}

impl From<GameWinner> for WinnerTeam {
    fn from(w: GameWinner) -> Self {
        match w {
            GameWinner::TeamA => WinnerTeam::TeamA,
            GameWinner::TeamB => WinnerTeam::TeamB,
            GameWinner::Draw => WinnerTeam::Draw,
        }
    }
}

impl From<WinnerTeam> for GameWinner {
    fn from(w: WinnerTeam) -> Self {
        match w {
            WinnerTeam::TeamA => GameWinner::TeamA,
            WinnerTeam::TeamB => GameWinner::TeamB,
            WinnerTeam::Draw => GameWinner::Draw,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tables")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub status: TableStatus,
    /// Stake per seat, integer centavos.
    pub stake: i64,
    #[sea_orm(column_name = "created_by")]
    pub created_by: i64,
    pub trump: Option<CardSuit>,
    /// Seed of the deal's shuffle; kept for audit/replay.
    #[sea_orm(column_name = "rng_seed")]
    pub rng_seed: Option<i64>,
    #[sea_orm(column_name = "current_round", column_type = "SmallInteger")]
    pub current_round: i16,
    #[sea_orm(column_name = "current_trick", column_type = "SmallInteger")]
    pub current_trick: i16,
    #[sea_orm(column_name = "current_turn", column_type = "SmallInteger")]
    pub current_turn: i16,
    #[sea_orm(column_name = "score_a", column_type = "SmallInteger")]
    pub score_a: i16,
    #[sea_orm(column_name = "score_b", column_type = "SmallInteger")]
    pub score_b: i16,
    pub winner: Option<WinnerTeam>,
    #[sea_orm(column_name = "turn_deadline_at")]
    pub turn_deadline_at: Option<OffsetDateTime>,
    pub version: i32,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
    #[sea_orm(column_name = "started_at")]
    pub started_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "ended_at")]
    pub ended_at: Option<OffsetDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::seats::Entity")]
    Seats,
    #[sea_orm(has_many = "super::moves::Entity")]
    Moves,
}

impl Related<super::seats::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seats.def()
    }
}

impl Related<super::moves::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Moves.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
