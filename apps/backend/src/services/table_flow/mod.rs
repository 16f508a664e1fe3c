//! Table lifecycle orchestration: bridges the pure game rules with DB
//! persistence.
//!
//! Every money- or state-moving operation runs inside one transaction owned
//! by the caller (routes and the watchdog both go through
//! [`crate::db::txn::with_txn`]); the methods here never commit themselves.

mod lifecycle;
mod plays;
mod settlement;

use crate::config::engine::EngineConfig;

pub use lifecycle::{CancelOutcome, JoinOutcome};
pub use plays::PlayResult;
pub use settlement::SettledOutcome;

/// Table flow service. Methods are generic over the transaction so the same
/// path serves HTTP handlers, the watchdog, and tests.
#[derive(Clone)]
pub struct TableFlowService {
    engine: EngineConfig,
}

impl TableFlowService {
    pub fn new(engine: EngineConfig) -> Self {
        Self { engine }
    }
}
