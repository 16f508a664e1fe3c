//! Move repository functions for the domain layer.
//!
//! Moves are append-only; the current trick is reconstructed from the plays
//! recorded against it, in play order.

use sea_orm::ConnectionTrait;

use crate::adapters::moves_sea as moves_adapter;
use crate::domain::cards::{parse_card_str, Card};
use crate::entities::moves;
use crate::errors::domain::{DomainError, InfraErrorKind};

pub use crate::adapters::moves_sea::MoveCreate;

/// A single recorded play.
#[derive(Debug, Clone, PartialEq)]
pub struct Play {
    pub seat: u8,
    pub card: Card,
    pub trick_no: u8,
    pub play_order: u8,
}

impl TryFrom<moves::Model> for Play {
    type Error = DomainError;

    fn try_from(model: moves::Model) -> Result<Self, Self::Error> {
        let card = parse_card_str(&model.card).map_err(|_| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Invalid card token in move row {}: {}", model.id, model.card),
            )
        })?;
        Ok(Self {
            seat: model.seat as u8,
            card,
            trick_no: model.trick_no as u8,
            play_order: model.play_order as u8,
        })
    }
}

pub async fn create_move<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MoveCreate,
) -> Result<(), DomainError> {
    moves_adapter::create_move(conn, dto).await?;
    Ok(())
}

/// Plays of a single trick, ordered by play order.
pub async fn find_trick_plays<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    table_id: i64,
    trick_no: u8,
) -> Result<Vec<Play>, DomainError> {
    let rows = moves_adapter::find_by_table_and_trick(conn, table_id, i16::from(trick_no)).await?;
    rows.into_iter().map(Play::try_from).collect()
}
