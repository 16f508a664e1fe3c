//! Payout of a finished game. Runs in its own transaction, gated on
//! SETTLEMENT_PENDING: the credits and the flip to FINISHED land atomically,
//! and the status gate makes retries exactly-once.

use sea_orm::DatabaseTransaction;
use time::OffsetDateTime;
use tracing::info;

use super::TableFlowService;
use crate::adapters::tables_sea::TableUpdate;
use crate::domain::settlement::{plan_settlement, SettlementPlan};
use crate::domain::state::GameWinner;
use crate::entities::tables::TableStatus;
use crate::error::AppError;
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};
use crate::repos::seats;
use crate::repos::tables;
use crate::repos::wallets;

/// A completed settlement, for logging and post-commit hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettledOutcome {
    pub winner: GameWinner,
    pub plan: SettlementPlan,
    /// (user_id, centavos credited), one entry per credited seat.
    pub credits: Vec<(i64, i64)>,
}

impl TableFlowService {
    /// Pay out a table in SETTLEMENT_PENDING and flip it to FINISHED.
    ///
    /// A decided game credits the winning pair with the pot net of rake; a
    /// 60-60 draw refunds every stake in full. If this transaction fails the
    /// table stays SETTLEMENT_PENDING and the watchdog retries it.
    pub async fn settle(
        &self,
        txn: &DatabaseTransaction,
        table_id: i64,
    ) -> Result<SettledOutcome, AppError> {
        let table = tables::require_table(txn, table_id).await?;
        if table.status != TableStatus::SettlementPending {
            return Err(DomainError::validation(
                ValidationKind::GameNotActive,
                "Table has no pending settlement",
            )
            .into());
        }
        let winner = table.winner.ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                "Settlement-pending table has no winner",
            )
        })?;

        let plan = plan_settlement(table.stake, self.engine.rake_bps, winner);

        let seated = seats::find_all_by_table(txn, table_id).await?;
        let mut credits = Vec::with_capacity(plan.credits().len());
        for (position, amount) in plan.credits() {
            let seat = seated
                .iter()
                .find(|s| s.position == *position)
                .ok_or_else(|| {
                    DomainError::infra(
                        InfraErrorKind::DataCorruption,
                        format!("No seat row at position {position} during settlement"),
                    )
                })?;
            wallets::credit(txn, seat.user_id, *amount).await?;
            credits.push((seat.user_id, *amount));
        }

        let update = TableUpdate::new(table.id, table.version)
            .with_status(TableStatus::Finished)
            .with_ended_at(OffsetDateTime::now_utc());
        tables::update_table(txn, update).await?;

        info!(
            table_id,
            winner = ?winner,
            rake = plan.rake(),
            "table settled"
        );
        Ok(SettledOutcome {
            winner,
            plan,
            credits,
        })
    }
}
