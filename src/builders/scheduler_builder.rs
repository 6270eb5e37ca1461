//! Build a [`ProbeScheduler`] from [`ProbeConfig`].

use std::sync::Arc;

use crate::config::ProbeConfig;
use crate::core::{
    ProbeExecutor, ProbeScheduler, SchedulerError, SchedulerOptions, Spawn, Ticker,
};
use crate::util::clock::{Clock, SystemClock};

/// Validates a [`ProbeConfig`] and assembles a scheduler from injected parts.
#[derive(Clone)]
pub struct SchedulerBuilder {
    config: ProbeConfig,
    clock: Arc<dyn Clock>,
}

impl SchedulerBuilder {
    /// Builder over `config` using the system clock.
    pub fn new(config: ProbeConfig) -> Self {
        Self {
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Use an injected clock for record timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Configuration the scheduler will be built with.
    pub const fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Options derived from the configuration.
    pub fn options(&self) -> SchedulerOptions {
        SchedulerOptions {
            probe_timeout: self.config.timeout(),
            history_capacity: self.config.history_capacity,
            clock: Arc::clone(&self.clock),
        }
    }

    /// Validate the configuration and build an idle scheduler.
    ///
    /// # Errors
    /// Returns [`SchedulerError::InvalidConfig`] when validation fails.
    pub fn build<E, S, T>(
        &self,
        executor: E,
        spawner: S,
        ticker: T,
    ) -> Result<ProbeScheduler<E, S, T>, SchedulerError>
    where
        E: ProbeExecutor,
        S: Spawn + Clone + Send + Sync + 'static,
        T: Ticker,
    {
        self.config
            .validate()
            .map_err(|e| SchedulerError::InvalidConfig(format!("config invalid: {e}")))?;
        tracing::debug!(
            timeout_ms = self.config.timeout_ms,
            history_capacity = self.config.history_capacity,
            "building probe scheduler"
        );
        Ok(ProbeScheduler::with_options(
            executor,
            spawner,
            ticker,
            self.options(),
        ))
    }
}

impl std::fmt::Debug for SchedulerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedulerBuilder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
