use sea_orm::DatabaseConnection;

use crate::config::engine::EngineConfig;
use crate::services::hooks::EngineHooks;

/// Application state containing shared resources.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub engine: EngineConfig,
    pub hooks: EngineHooks,
}

impl AppState {
    pub fn new(db: DatabaseConnection, engine: EngineConfig) -> Self {
        Self {
            db,
            engine,
            hooks: EngineHooks::default(),
        }
    }

    pub fn with_hooks(mut self, hooks: EngineHooks) -> Self {
        self.hooks = hooks;
        self
    }
}
