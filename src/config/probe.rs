//! Probe scheduler configuration.

use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::{AppResult, DEFAULT_HISTORY_CAPACITY};

/// Environment variable naming the host to probe.
pub const ENV_TARGET: &str = "PING_PROBE_TARGET";
/// Environment variable for the tick period in milliseconds.
pub const ENV_PERIOD_MS: &str = "PING_PROBE_PERIOD_MS";
/// Environment variable for the probe deadline in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "PING_PROBE_TIMEOUT_MS";
/// Environment variable for the history capacity.
pub const ENV_HISTORY_CAPACITY: &str = "PING_PROBE_HISTORY_CAPACITY";

const fn default_period_ms() -> u64 {
    1000
}

const fn default_timeout_ms() -> u64 {
    1000
}

const fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

/// Scheduler configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Host to probe when started without an explicit target.
    #[serde(default)]
    pub target: Option<String>,
    /// Tick period in milliseconds.
    #[serde(default = "default_period_ms")]
    pub period_ms: u64,
    /// Per-probe deadline in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Number of results kept in history.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            target: None,
            period_ms: default_period_ms(),
            timeout_ms: default_timeout_ms(),
            history_capacity: default_history_capacity(),
        }
    }
}

impl ProbeConfig {
    /// Set the default target.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Set the tick period.
    pub const fn with_period_ms(mut self, period_ms: u64) -> Self {
        self.period_ms = period_ms;
        self
    }

    /// Set the probe deadline.
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the history capacity.
    pub const fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Tick period.
    pub const fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }

    /// Probe deadline.
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.period_ms == 0 {
            return Err("period_ms must be greater than 0".into());
        }
        if self.timeout_ms == 0 {
            return Err("timeout_ms must be greater than 0".into());
        }
        if self.history_capacity == 0 {
            return Err("history_capacity must be greater than 0".into());
        }
        if self.target.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err("target must not be empty when set".into());
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load `.env` if present, then apply `PING_PROBE_*` overrides to the defaults.
    ///
    /// # Errors
    /// Fails on non-numeric overrides or values rejected by [`ProbeConfig::validate`].
    pub fn from_env() -> AppResult<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup to the defaults.
    ///
    /// # Errors
    /// Fails on non-numeric overrides or values rejected by [`ProbeConfig::validate`].
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(target) = lookup(ENV_TARGET) {
            cfg.target = Some(target);
        }
        if let Some(raw) = lookup(ENV_PERIOD_MS) {
            cfg.period_ms = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_PERIOD_MS}={raw:?} is not a number"))?;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            cfg.timeout_ms = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_TIMEOUT_MS}={raw:?} is not a number"))?;
        }
        if let Some(raw) = lookup(ENV_HISTORY_CAPACITY) {
            cfg.history_capacity = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_HISTORY_CAPACITY}={raw:?} is not a number"))?;
        }
        cfg.validate().map_err(anyhow::Error::msg)?;
        Ok(cfg)
    }
}
