//! Table repository functions for the domain layer.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::tables_sea as tables_adapter;
use crate::domain::cards::Suit;
use crate::domain::state::GameWinner;
use crate::entities::tables::{self, TableStatus};
use crate::errors::domain::{DomainError, NotFoundKind};

pub use crate::adapters::tables_sea::{TableCreate, TableUpdate};

/// Table domain model, converted from the database row.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub id: i64,
    pub status: TableStatus,
    pub stake: i64,
    pub created_by: i64,
    pub trump: Option<Suit>,
    pub rng_seed: Option<i64>,
    pub current_round: u8,
    pub current_trick: u8,
    pub current_turn: u8,
    pub score_a: u8,
    pub score_b: u8,
    pub winner: Option<GameWinner>,
    pub turn_deadline_at: Option<OffsetDateTime>,
    pub version: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub started_at: Option<OffsetDateTime>,
    pub ended_at: Option<OffsetDateTime>,
}

impl From<tables::Model> for Table {
    fn from(model: tables::Model) -> Self {
        Self {
            id: model.id,
            status: model.status,
            stake: model.stake,
            created_by: model.created_by,
            trump: model.trump.map(Suit::from),
            rng_seed: model.rng_seed,
            current_round: model.current_round as u8,
            current_trick: model.current_trick as u8,
            current_turn: model.current_turn as u8,
            score_a: model.score_a as u8,
            score_b: model.score_b as u8,
            winner: model.winner.map(GameWinner::from),
            turn_deadline_at: model.turn_deadline_at,
            version: model.version,
            created_at: model.created_at,
            updated_at: model.updated_at,
            started_at: model.started_at,
            ended_at: model.ended_at,
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    table_id: i64,
) -> Result<Option<Table>, DomainError> {
    let table = tables_adapter::find_by_id(conn, table_id).await?;
    Ok(table.map(Table::from))
}

/// Find table by ID or return a domain NotFound.
pub async fn require_table<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    table_id: i64,
) -> Result<Table, DomainError> {
    find_by_id(conn, table_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Table, format!("Table {table_id} not found"))
    })
}

pub async fn create_table<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TableCreate,
) -> Result<Table, DomainError> {
    let table = tables_adapter::create_table(conn, dto).await?;
    Ok(Table::from(table))
}

/// Apply an optimistic-lock update; see `adapters::tables_sea::update_table`.
pub async fn update_table<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TableUpdate,
) -> Result<Table, DomainError> {
    let table = tables_adapter::update_table(conn, dto).await?;
    Ok(Table::from(table))
}

pub async fn find_expired_turns<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    now: OffsetDateTime,
    limit: u64,
) -> Result<Vec<Table>, DomainError> {
    let rows = tables_adapter::find_expired_turns(conn, now, limit).await?;
    Ok(rows.into_iter().map(Table::from).collect())
}

pub async fn find_settlement_pending<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
) -> Result<Vec<Table>, DomainError> {
    let rows = tables_adapter::find_settlement_pending(conn, limit).await?;
    Ok(rows.into_iter().map(Table::from).collect())
}
