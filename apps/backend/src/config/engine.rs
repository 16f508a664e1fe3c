use std::env;
use std::time::Duration;

use tracing::warn;

use crate::error::AppError;

/// Default house fee: 10% of the pot, in basis points.
pub const DEFAULT_RAKE_BPS: u16 = 1000;
/// House fee bounds, in basis points.
pub const MIN_RAKE_BPS: u16 = 1000;
pub const MAX_RAKE_BPS: u16 = 2000;
/// Default time a seat has to play before the watchdog plays for it.
pub const DEFAULT_TURN_TIMEOUT_SECS: u64 = 15;
/// Default watchdog poll interval.
pub const DEFAULT_WATCHDOG_POLL_MS: u64 = 1000;
/// Tables processed per watchdog sweep.
pub const DEFAULT_WATCHDOG_BATCH: u64 = 32;

/// Engine tunables, read once at startup.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// House fee taken from the pot on a decided game, in basis points.
    pub rake_bps: u16,
    /// How long a seat may stall before autoplay kicks in.
    pub turn_timeout: Duration,
    /// How often the watchdog scans for expired turns and pending payouts.
    pub watchdog_poll: Duration,
    /// Upper bound on tables handled in one watchdog sweep.
    pub watchdog_batch: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rake_bps: DEFAULT_RAKE_BPS,
            turn_timeout: Duration::from_secs(DEFAULT_TURN_TIMEOUT_SECS),
            watchdog_poll: Duration::from_millis(DEFAULT_WATCHDOG_POLL_MS),
            watchdog_batch: DEFAULT_WATCHDOG_BATCH,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults. Rake outside the allowed band is clamped, with a warning.
    pub fn from_env() -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Some(bps) = parse_var::<u16>("ENGINE_RAKE_BPS")? {
            let clamped = bps.clamp(MIN_RAKE_BPS, MAX_RAKE_BPS);
            if clamped != bps {
                warn!(
                    requested = bps,
                    applied = clamped,
                    "ENGINE_RAKE_BPS outside allowed band, clamped"
                );
            }
            config.rake_bps = clamped;
        }
        if let Some(secs) = parse_var::<u64>("ENGINE_TURN_TIMEOUT_SECS")? {
            if secs == 0 {
                return Err(AppError::config("ENGINE_TURN_TIMEOUT_SECS must be > 0"));
            }
            config.turn_timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = parse_var::<u64>("ENGINE_WATCHDOG_POLL_MS")? {
            if ms == 0 {
                return Err(AppError::config("ENGINE_WATCHDOG_POLL_MS must be > 0"));
            }
            config.watchdog_poll = Duration::from_millis(ms);
        }
        if let Some(batch) = parse_var::<u64>("ENGINE_WATCHDOG_BATCH")? {
            if batch == 0 {
                return Err(AppError::config("ENGINE_WATCHDOG_BATCH must be > 0"));
            }
            config.watchdog_batch = batch;
        }

        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::config(format!("Invalid value for {name}: {raw}"))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_values() {
        let config = EngineConfig::default();
        assert_eq!(config.rake_bps, 1000);
        assert_eq!(config.turn_timeout, Duration::from_secs(15));
        assert_eq!(config.watchdog_poll, Duration::from_millis(1000));
    }
}
