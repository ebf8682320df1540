use analysis_core::ScanError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use market_regime_detector::DEFAULT_UNIVERSE_SIZE;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Max per-ticker fetches in flight
    pub concurrency: usize,
    /// Calendar look-ahead for upcoming events
    pub event_horizon_days: i64,
    /// Constituents in the breadth universe (S&P 500)
    pub breadth_universe_size: u32,
    /// Sentiment assumed when the crypto index cannot be fetched
    pub crypto_fallback: u8,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            concurrency: 8,
            event_horizon_days: 30,
            breadth_universe_size: DEFAULT_UNIVERSE_SIZE,
            crypto_fallback: 50,
        }
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}

impl ScannerConfig {
    /// Load from environment (and `.env` when present), falling back to defaults
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_current_env()
    }

    fn from_current_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            concurrency: env_or("SCANNER_CONCURRENCY", defaults.concurrency)?,
            event_horizon_days: env_or("SCANNER_EVENT_HORIZON_DAYS", defaults.event_horizon_days)?,
            breadth_universe_size: env_or("SCANNER_BREADTH_UNIVERSE", defaults.breadth_universe_size)?,
            crypto_fallback: env_or("SCANNER_CRYPTO_FALLBACK", defaults.crypto_fallback)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ScanError> {
        let invalid = |msg: &str| Err(ScanError::Config(msg.to_string()));

        if self.concurrency == 0 {
            return invalid("SCANNER_CONCURRENCY must be at least 1");
        }
        if self.event_horizon_days < 0 {
            return invalid("SCANNER_EVENT_HORIZON_DAYS must not be negative");
        }
        if self.breadth_universe_size == 0 {
            return invalid("SCANNER_BREADTH_UNIVERSE must be at least 1");
        }
        if self.crypto_fallback > 100 {
            return invalid("SCANNER_CRYPTO_FALLBACK must be within 0-100");
        }
        Ok(())
    }
}
