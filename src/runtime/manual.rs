//! Deterministic ticker and clock for tests and simulations.
//!
//! Time only moves when [`ManualTicker::advance`] is called. Every timer deadline
//! crossed during an advance fires synchronously, in deadline order, on the
//! caller's thread.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::core::{TickFn, Ticker, TimerHandle};
use crate::util::clock::Clock;

struct ManualTimer {
    id: u64,
    period: Duration,
    next_fire: Duration,
    on_tick: TickFn,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_id: u64,
    timers: Vec<ManualTimer>,
}

/// Fake clock that doubles as a [`Ticker`] and a [`Clock`].
#[derive(Clone, Default)]
pub struct ManualTicker {
    state: Arc<Mutex<ManualState>>,
}

impl ManualTicker {
    /// Create a ticker at time zero with no armed timers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn elapsed(&self) -> Duration {
        self.state.lock().now
    }

    /// Number of armed timers.
    pub fn armed(&self) -> usize {
        self.state.lock().timers.len()
    }

    /// Move virtual time forward by `by`, firing every deadline reached.
    ///
    /// Returns the number of ticks delivered.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.state.lock().now + by;
        let mut fired = 0;
        loop {
            // Lock is released before the callback runs so it may cancel timers.
            let due = {
                let mut state = self.state.lock();
                let next = state
                    .timers
                    .iter_mut()
                    .filter(|timer| timer.next_fire <= target)
                    .min_by_key(|timer| (timer.next_fire, timer.id));
                match next {
                    Some(timer) => {
                        let fire_at = timer.next_fire;
                        timer.next_fire += timer.period;
                        let on_tick = Arc::clone(&timer.on_tick);
                        state.now = fire_at;
                        Some(on_tick)
                    }
                    None => {
                        state.now = target;
                        None
                    }
                }
            };
            match due {
                Some(on_tick) => {
                    on_tick();
                    fired += 1;
                }
                None => return fired,
            }
        }
    }

    /// Advance by `n` whole multiples of `period`.
    pub fn advance_periods(&self, period: Duration, n: u32) -> usize {
        self.advance(period * n)
    }
}

impl Ticker for ManualTicker {
    fn arm(&self, period: Duration, on_tick: TickFn) -> TimerHandle {
        let mut state = self.state.lock();
        let id = state.next_id;
        state.next_id += 1;
        let next_fire = state.now + period;
        state.timers.push(ManualTimer {
            id,
            period,
            next_fire,
            on_tick,
        });
        drop(state);

        let shared = Arc::clone(&self.state);
        TimerHandle::new(move || {
            shared.lock().timers.retain(|timer| timer.id != id);
        })
    }
}

impl Clock for ManualTicker {
    fn now_ms(&self) -> u128 {
        self.state.lock().now.as_millis()
    }
}

impl std::fmt::Debug for ManualTicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ManualTicker")
            .field("now", &state.now)
            .field("armed", &state.timers.len())
            .finish()
    }
}
