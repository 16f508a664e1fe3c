//! Table creation, joining, and cancellation. Each method is the body of a
//! single transaction: the wallet movement and the table/seat rows commit or
//! roll back together.

use sea_orm::DatabaseTransaction;
use time::OffsetDateTime;
use tracing::{debug, info};

use super::TableFlowService;
use crate::adapters::tables_sea::{TableCreate, TableUpdate};
use crate::domain::dealing::{self, FIRST_TURN};
use crate::domain::rules::{Team, SEATS};
use crate::entities::tables::{CardSuit, TableStatus};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::repos::seats::{self, SeatCreate};
use crate::repos::tables::{self, Table};
use crate::repos::wallets;

/// Result of a join, including whether it filled the table and dealt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    pub position: u8,
    pub dealt: bool,
    pub version: i32,
    /// Stake escrowed by this join, for post-commit hooks.
    pub stake: i64,
}

/// Result of a cancellation: who got their stake back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelOutcome {
    pub refunds: Vec<(i64, i64)>,
}

impl TableFlowService {
    /// Open a table. Escrows the host's stake and seats them at position 0;
    /// any failure rolls the debit back with the insert.
    pub async fn create_table(
        &self,
        txn: &DatabaseTransaction,
        user_id: i64,
        stake: i64,
    ) -> Result<Table, AppError> {
        if stake <= 0 {
            return Err(DomainError::validation(
                ValidationKind::InvalidStake,
                format!("Stake must be positive, got {stake}"),
            )
            .into());
        }

        wallets::debit(txn, user_id, stake).await?;
        let table = tables::create_table(txn, TableCreate { stake, created_by: user_id }).await?;
        seats::create_seat(
            txn,
            SeatCreate {
                table_id: table.id,
                user_id,
                position: 0,
            },
        )
        .await?;

        info!(table_id = table.id, user_id, stake, "table created");
        Ok(table)
    }

    /// Join a waiting table at the lowest free position. A requested team is
    /// honored when a matching-parity position is free, otherwise ignored.
    /// The fourth join deals the game inside the same transaction.
    pub async fn join_table(
        &self,
        txn: &DatabaseTransaction,
        table_id: i64,
        user_id: i64,
        team: Option<Team>,
    ) -> Result<JoinOutcome, AppError> {
        let table = tables::require_table(txn, table_id).await?;
        if table.status != TableStatus::Waiting {
            return Err(DomainError::validation(
                ValidationKind::NotWaiting,
                "Table is not accepting players",
            )
            .into());
        }

        let seated = seats::find_all_by_table(txn, table_id).await?;
        if seated.iter().any(|s| s.user_id == user_id) {
            return Err(DomainError::conflict(
                ConflictKind::AlreadyAtTable,
                format!("User {user_id} is already seated at table {table_id}"),
            )
            .into());
        }
        if seated.len() >= SEATS {
            return Err(
                DomainError::conflict(ConflictKind::TableFull, "Table has no free seat").into(),
            );
        }

        let position = pick_position(&seated, team).ok_or_else(|| {
            DomainError::conflict(ConflictKind::TableFull, "Table has no free seat")
        })?;

        wallets::debit(txn, user_id, table.stake).await?;
        seats::create_seat(
            txn,
            SeatCreate {
                table_id,
                user_id,
                position: i16::from(position),
            },
        )
        .await?;

        let filled = seated.len() + 1 == SEATS;
        let updated = if filled {
            self.deal_table(txn, &table).await?
        } else {
            // Version bump with no field changes: serializes concurrent joins
            // on the optimistic lock.
            tables::update_table(txn, TableUpdate::new(table.id, table.version)).await?
        };

        info!(table_id, user_id, position, dealt = filled, "player joined");
        Ok(JoinOutcome {
            position,
            dealt: filled,
            version: updated.version,
            stake: table.stake,
        })
    }

    /// Deal the freshly filled table: draw a seed from OS entropy, persist it
    /// for audit, shuffle, and arm the first turn deadline.
    async fn deal_table(
        &self,
        txn: &DatabaseTransaction,
        table: &Table,
    ) -> Result<Table, AppError> {
        let seed: u64 = rand::random();
        let deal = dealing::deal(seed);
        debug!(table_id = table.id, trump = deal.trump.as_str(), "dealing");

        let seated = seats::find_all_by_table(txn, table.id).await?;
        for seat in &seated {
            seats::update_hand(txn, seat.id, &deal.hands[seat.position as usize]).await?;
        }

        let now = OffsetDateTime::now_utc();
        let update = TableUpdate::new(table.id, table.version)
            .with_status(TableStatus::Playing)
            .with_trump(CardSuit::from(deal.trump))
            .with_rng_seed(seed as i64)
            .with_current_round(1)
            .with_current_trick(1)
            .with_current_turn(i16::from(FIRST_TURN))
            .with_scores(0, 0)
            .with_turn_deadline(Some(now + self.engine.turn_timeout))
            .with_started_at(now);
        let updated = tables::update_table(txn, update).await?;

        info!(table_id = table.id, rng_seed = seed, "game dealt");
        Ok(updated)
    }

    /// Cancel a waiting table. Host only; refunds every seated stake in full.
    pub async fn cancel_table(
        &self,
        txn: &DatabaseTransaction,
        table_id: i64,
        user_id: i64,
    ) -> Result<CancelOutcome, AppError> {
        let table = tables::require_table(txn, table_id).await?;
        if table.created_by != user_id {
            return Err(DomainError::validation(
                ValidationKind::NotHost,
                "Only the host can cancel a table",
            )
            .into());
        }
        if table.status != TableStatus::Waiting {
            return Err(DomainError::validation(
                ValidationKind::NotWaiting,
                "Only a waiting table can be cancelled",
            )
            .into());
        }

        let seated = seats::find_all_by_table(txn, table_id).await?;
        let mut refunds = Vec::with_capacity(seated.len());
        for seat in &seated {
            wallets::credit(txn, seat.user_id, table.stake).await?;
            refunds.push((seat.user_id, table.stake));
        }

        let update = TableUpdate::new(table.id, table.version)
            .with_status(TableStatus::Cancelled)
            .with_ended_at(OffsetDateTime::now_utc());
        tables::update_table(txn, update).await?;

        info!(table_id, refunded_seats = refunds.len(), "table cancelled");
        Ok(CancelOutcome { refunds })
    }
}

/// Lowest free position, preferring the requested team's parity when a
/// matching position is free.
fn pick_position(seated: &[crate::repos::seats::Seat], team: Option<Team>) -> Option<u8> {
    let taken: Vec<u8> = seated.iter().map(|s| s.position).collect();
    let free = || (0..SEATS as u8).filter(|p| !taken.contains(p));

    if let Some(team) = team {
        if let Some(p) = free().find(|p| Team::for_position(*p) == team) {
            return Some(p);
        }
    }
    free().next()
}
