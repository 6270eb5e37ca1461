//! Repeating timer abstraction driving scheduler ticks.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Callback invoked once per timer period.
pub type TickFn = Arc<dyn Fn() + Send + Sync>;

/// Source of fixed-period ticks.
///
/// `arm` must not invoke `on_tick` synchronously; the first tick fires one full
/// `period` after arming, later ticks follow on a fixed wall-clock cadence that
/// does not wait for earlier callbacks' spawned work.
pub trait Ticker: Send + Sync {
    /// Start a repeating timer. Dropping or cancelling the handle stops it.
    fn arm(&self, period: Duration, on_tick: TickFn) -> TimerHandle;
}

/// Cancellation handle for an armed timer.
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TimerHandle {
    /// Wrap a cancellation action.
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Stop the timer. No further ticks are delivered once this returns.
    pub fn cancel(mut self) {
        self.fire();
    }

    fn fire(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.fire();
    }
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}
