//! Seat repository functions for the domain layer.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::seats_sea as seats_adapter;
use crate::domain::cards::Card;
use crate::entities::seats;
use crate::errors::domain::{DomainError, InfraErrorKind};

pub use crate::adapters::seats_sea::SeatCreate;

/// Seat domain model with hands and captured piles as typed cards.
#[derive(Debug, Clone, PartialEq)]
pub struct Seat {
    pub id: i64,
    pub table_id: i64,
    pub user_id: i64,
    pub position: u8,
    pub hand: Vec<Card>,
    pub captured: Vec<Card>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

fn cards_from_json(field: &str, value: &serde_json::Value) -> Result<Vec<Card>, DomainError> {
    serde_json::from_value(value.clone()).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("Invalid {field} payload in seat row: {e}"),
        )
    })
}

pub fn cards_to_json(cards: &[Card]) -> serde_json::Value {
    serde_json::to_value(cards).unwrap_or_else(|_| serde_json::json!([]))
}

impl TryFrom<seats::Model> for Seat {
    type Error = DomainError;

    fn try_from(model: seats::Model) -> Result<Self, Self::Error> {
        let hand = cards_from_json("hand", &model.hand)?;
        let captured = cards_from_json("captured", &model.captured)?;
        Ok(Self {
            id: model.id,
            table_id: model.table_id,
            user_id: model.user_id,
            position: model.position as u8,
            hand,
            captured,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

pub async fn create_seat<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SeatCreate,
) -> Result<Seat, DomainError> {
    let seat = seats_adapter::create_seat(conn, dto).await?;
    Seat::try_from(seat)
}

/// All seats at a table, ordered by position.
pub async fn find_all_by_table<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    table_id: i64,
) -> Result<Vec<Seat>, DomainError> {
    let rows = seats_adapter::find_all_by_table(conn, table_id).await?;
    rows.into_iter().map(Seat::try_from).collect()
}

pub async fn find_by_table_and_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    table_id: i64,
    user_id: i64,
) -> Result<Option<Seat>, DomainError> {
    let seat = seats_adapter::find_by_table_and_user(conn, table_id, user_id).await?;
    seat.map(Seat::try_from).transpose()
}

pub async fn update_hand<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    seat_id: i64,
    hand: &[Card],
) -> Result<(), DomainError> {
    seats_adapter::update_hand(conn, seat_id, cards_to_json(hand)).await?;
    Ok(())
}

pub async fn update_hand_and_captured<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    seat_id: i64,
    hand: &[Card],
    captured: &[Card],
) -> Result<(), DomainError> {
    seats_adapter::update_hand_and_captured(conn, seat_id, cards_to_json(hand), cards_to_json(captured))
        .await?;
    Ok(())
}
