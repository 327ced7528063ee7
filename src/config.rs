//! Service configuration loaded from the environment
//!
//! Values come from defaults, then `.env` / process environment. The CLI
//! applies its own overrides on top of what is loaded here.

use crate::broker::BrokerConfig;
use crate::error::{Result, WorkerError};
use crate::transformer::TransformerConfig;
use crate::worker::WorkerConfig;
use std::str::FromStr;
use std::time::Duration;

/// All settings needed to start the worker
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub broker: BrokerConfig,
    pub transformer: TransformerConfig,
    pub worker: WorkerConfig,
}

impl ServiceConfig {
    /// Load from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup (used by tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let broker = BrokerConfig::from_lookup(&lookup)?;
        let transformer = TransformerConfig::from_lookup(&lookup)?;

        let worker = WorkerConfig::builder()
            .poll_timeout_ms(parse_or(&lookup, "POLL_TIMEOUT_MS", 1000)?)
            .flush_timeout(Duration::from_secs(parse_or(
                &lookup,
                "FLUSH_TIMEOUT_SECS",
                10,
            )?))
            .response_topic(&broker.response_topic)
            .build();

        Ok(Self {
            broker,
            transformer,
            worker,
        })
    }
}

/// Read a string setting, falling back to `default`
pub(crate) fn string_or<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Read and parse a setting, falling back to `default` when unset
pub(crate) fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| WorkerError::ConfigError(format!("{} = {:?}: {}", key, value, e))),
        None => Ok(default),
    }
}
