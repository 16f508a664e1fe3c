//! Background watchdog: autoplays expired turns and retries pending payouts.
//!
//! One tokio task per process. Each sweep scans for PLAYING tables whose
//! turn deadline has passed and plays a random legal card for the stalled
//! seat through the ordinary play path, then retries settlement for any
//! table stuck in SETTLEMENT_PENDING. Per-table failures are logged and
//! skipped; the sweep never dies.

use time::OffsetDateTime;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::db::txn::with_txn;
use crate::repos::tables;
use crate::services::table_flow::TableFlowService;
use crate::state::app_state::AppState;

/// Spawn the watchdog loop. The handle is detached by callers that run for
/// the life of the process; tests can abort it.
pub fn spawn(state: AppState) -> JoinHandle<()> {
    let service = TableFlowService::new(state.engine.clone());
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(state.engine.watchdog_poll);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            sweep(&state, &service).await;
        }
    })
}

/// One watchdog pass. Public so tests can drive it without the timer.
pub async fn sweep(state: &AppState, service: &TableFlowService) {
    let now = OffsetDateTime::now_utc();
    let batch = state.engine.watchdog_batch;

    let expired = match with_txn(&state.db, |txn| {
        Box::pin(async move { Ok(tables::find_expired_turns(txn, now, batch).await?) })
    })
    .await
    {
        Ok(rows) => rows,
        Err(e) => {
            warn!(error = %e, "watchdog scan for expired turns failed");
            Vec::new()
        }
    };
    for table in expired {
        let table_id = table.id;
        let service = service.clone();
        let result = with_txn(&state.db, move |txn| {
            Box::pin(async move { service.autoplay_expired_turn(txn, table_id, now).await })
        })
        .await;
        match result {
            Ok(Some(_)) => debug!(table_id, "autoplayed expired turn"),
            // The table moved on between the scan and the transaction.
            Ok(None) => {}
            Err(e) => warn!(table_id, error = %e, "autoplay failed"),
        }
    }

    let pending = match with_txn(&state.db, |txn| {
        Box::pin(async move { Ok(tables::find_settlement_pending(txn, batch).await?) })
    })
    .await
    {
        Ok(rows) => rows,
        Err(e) => {
            warn!(error = %e, "watchdog scan for pending settlements failed");
            Vec::new()
        }
    };
    for table in pending {
        let table_id = table.id;
        let service = service.clone();
        let result = with_txn(&state.db, move |txn| {
            Box::pin(async move { service.settle(txn, table_id).await })
        })
        .await;
        match result {
            Ok(outcome) => {
                state
                    .hooks
                    .notify_settled(table_id, outcome.winner, &outcome.plan, outcome.credits);
            }
            Err(e) => warn!(table_id, error = %e, "settlement retry failed"),
        }
    }
}
