//! Collaborator ports notified after money-moving actions commit.
//!
//! Hooks run on a spawned task after the owning transaction has committed.
//! They are fire-and-forget: a failing hook is logged at `warn` and never
//! fails or re-orders the action that triggered it.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::settlement::SettlementPlan;
use crate::domain::state::GameWinner;

/// Append-only record of money-moving events.
#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn record(&self, table_id: i64, event: &str, detail: &str) -> Result<(), String>;
}

/// Wager progress feed (bonus/rollover accounting).
#[async_trait]
pub trait BonusTracker: Send + Sync {
    async fn on_wager(&self, table_id: i64, user_id: i64, stake: i64) -> Result<(), String>;
}

/// House-fee feed (affiliate revenue share).
#[async_trait]
pub trait AffiliateTracker: Send + Sync {
    async fn on_house_fee(&self, table_id: i64, rake: i64) -> Result<(), String>;
}

/// Game-result feed (CRM / engagement).
#[async_trait]
pub trait CrmTracker: Send + Sync {
    async fn on_game_result(
        &self,
        table_id: i64,
        winner: GameWinner,
        credits: &[(i64, i64)],
    ) -> Result<(), String>;
}

/// Default collaborators: structured log lines, nothing external.
pub struct TracingAuditLog;

#[async_trait]
impl AuditLog for TracingAuditLog {
    async fn record(&self, table_id: i64, event: &str, detail: &str) -> Result<(), String> {
        info!(table_id, event, detail, "audit");
        Ok(())
    }
}

pub struct TracingBonusTracker;

#[async_trait]
impl BonusTracker for TracingBonusTracker {
    async fn on_wager(&self, table_id: i64, user_id: i64, stake: i64) -> Result<(), String> {
        info!(table_id, user_id, stake, "wager recorded");
        Ok(())
    }
}

pub struct TracingAffiliateTracker;

#[async_trait]
impl AffiliateTracker for TracingAffiliateTracker {
    async fn on_house_fee(&self, table_id: i64, rake: i64) -> Result<(), String> {
        info!(table_id, rake, "house fee recorded");
        Ok(())
    }
}

pub struct TracingCrmTracker;

#[async_trait]
impl CrmTracker for TracingCrmTracker {
    async fn on_game_result(
        &self,
        table_id: i64,
        winner: GameWinner,
        credits: &[(i64, i64)],
    ) -> Result<(), String> {
        info!(table_id, ?winner, ?credits, "game result recorded");
        Ok(())
    }
}

/// Bundle of collaborator ports shared through `AppState`.
#[derive(Clone)]
pub struct EngineHooks {
    pub audit: Arc<dyn AuditLog>,
    pub bonus: Arc<dyn BonusTracker>,
    pub affiliate: Arc<dyn AffiliateTracker>,
    pub crm: Arc<dyn CrmTracker>,
}

impl Default for EngineHooks {
    fn default() -> Self {
        Self {
            audit: Arc::new(TracingAuditLog),
            bonus: Arc::new(TracingBonusTracker),
            affiliate: Arc::new(TracingAffiliateTracker),
            crm: Arc::new(TracingCrmTracker),
        }
    }
}

impl EngineHooks {
    /// Post-commit notification for a stake escrowed at create/join.
    pub fn notify_wager(&self, table_id: i64, user_id: i64, stake: i64) {
        let audit = Arc::clone(&self.audit);
        let bonus = Arc::clone(&self.bonus);
        tokio::spawn(async move {
            if let Err(e) = audit
                .record(table_id, "wager", &format!("user {user_id} staked {stake}"))
                .await
            {
                warn!(table_id, user_id, error = %e, "audit hook failed");
            }
            if let Err(e) = bonus.on_wager(table_id, user_id, stake).await {
                warn!(table_id, user_id, error = %e, "bonus hook failed");
            }
        });
    }

    /// Post-commit notification for a refund (cancel or draw).
    pub fn notify_refund(&self, table_id: i64, user_id: i64, amount: i64) {
        let audit = Arc::clone(&self.audit);
        tokio::spawn(async move {
            if let Err(e) = audit
                .record(
                    table_id,
                    "refund",
                    &format!("user {user_id} refunded {amount}"),
                )
                .await
            {
                warn!(table_id, user_id, error = %e, "audit hook failed");
            }
        });
    }

    /// Post-commit notification for a completed settlement.
    ///
    /// `credits` pairs user ids with the centavos credited to each.
    pub fn notify_settled(
        &self,
        table_id: i64,
        winner: GameWinner,
        plan: &SettlementPlan,
        credits: Vec<(i64, i64)>,
    ) {
        let audit = Arc::clone(&self.audit);
        let affiliate = Arc::clone(&self.affiliate);
        let crm = Arc::clone(&self.crm);
        let rake = plan.rake();
        tokio::spawn(async move {
            if let Err(e) = audit
                .record(table_id, "settled", &format!("credits {credits:?}"))
                .await
            {
                warn!(table_id, error = %e, "audit hook failed");
            }
            if rake > 0 {
                if let Err(e) = affiliate.on_house_fee(table_id, rake).await {
                    warn!(table_id, error = %e, "affiliate hook failed");
                }
            }
            if let Err(e) = crm.on_game_result(table_id, winner, &credits).await {
                warn!(table_id, error = %e, "crm hook failed");
            }
        });
    }
}
