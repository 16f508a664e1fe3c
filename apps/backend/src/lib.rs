#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;

// Re-exports for public API
pub use config::db::db_url;
pub use config::engine::EngineConfig;
pub use error::AppError;
pub use errors::ErrorCode;
pub use state::app_state::AppState;
