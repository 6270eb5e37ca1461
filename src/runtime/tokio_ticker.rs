//! Tokio interval-backed ticker.

use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::core::{SchedulerError, TickFn, Ticker, TimerHandle};

/// Fires ticks from a `tokio::time::Interval` running in its own task.
///
/// The callback only records or dispatches work, so a slow probe never delays the
/// next tick. Missed ticks (runtime stalls) are skipped rather than burst.
#[derive(Clone, Debug)]
pub struct TokioTicker {
    handle: tokio::runtime::Handle,
}

impl TokioTicker {
    /// Create a ticker that spawns its timer tasks on `handle`.
    pub const fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }

    /// Ticker for the runtime the caller is executing on.
    ///
    /// # Errors
    /// Returns `SchedulerError::Backend` when called outside a tokio runtime.
    pub fn current() -> Result<Self, SchedulerError> {
        tokio::runtime::Handle::try_current()
            .map(Self::new)
            .map_err(|e| SchedulerError::Backend(format!("no tokio runtime: {e}")))
    }
}

impl Ticker for TokioTicker {
    fn arm(&self, period: Duration, on_tick: TickFn) -> TimerHandle {
        let first = Instant::now() + period;
        let task = self.handle.spawn(async move {
            let mut interval = interval_at(first, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                on_tick();
            }
        });
        TimerHandle::new(move || task.abort())
    }
}
