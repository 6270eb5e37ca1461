//! Optional traffic counters for display alongside probe history.
//!
//! Nothing in the scheduler depends on this module. [`TrafficMeter::read`] returns
//! `None` on any failure so a missing or unreadable source never affects probing.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sysinfo::Networks;

use crate::core::SchedulerError;
use crate::util::clock::{Clock, SystemClock};

/// Cumulative byte counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficCounters {
    /// Bytes received.
    pub bytes_received: u64,
    /// Bytes sent.
    pub bytes_sent: u64,
}

/// Counters plus rates derived from the previous read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrafficStats {
    /// Cumulative counters.
    pub counters: TrafficCounters,
    /// Receive rate in bytes per second.
    pub receive_rate_bps: f64,
    /// Send rate in bytes per second.
    pub send_rate_bps: f64,
}

/// Read-only source of cumulative byte counters.
pub trait TrafficSource: Send + Sync {
    /// Current cumulative counters.
    fn counters(&self) -> Result<TrafficCounters, SchedulerError>;
}

/// Loopback interface names across Linux (`lo`), BSD/macOS (`lo0`) and Windows.
pub fn is_loopback(interface: &str) -> bool {
    interface == "lo" || interface.starts_with("lo0") || interface.contains("Loopback")
}

/// Sum `(interface, received, transmitted)` rows, skipping loopback unless asked.
pub fn sum_interfaces<'a, I>(rows: I, include_loopback: bool) -> TrafficCounters
where
    I: IntoIterator<Item = (&'a str, u64, u64)>,
{
    rows.into_iter()
        .filter(|(name, _, _)| include_loopback || !is_loopback(name))
        .fold(TrafficCounters::default(), |total, (_, rx, tx)| TrafficCounters {
            bytes_received: total.bytes_received.saturating_add(rx),
            bytes_sent: total.bytes_sent.saturating_add(tx),
        })
}

/// Host-wide counters from `sysinfo`, summed across interfaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemNetworks {
    include_loopback: bool,
}

impl SystemNetworks {
    /// Reader excluding loopback.
    pub const fn new() -> Self {
        Self {
            include_loopback: false,
        }
    }

    /// Count loopback traffic too.
    pub const fn with_loopback(mut self, include: bool) -> Self {
        self.include_loopback = include;
        self
    }
}

impl TrafficSource for SystemNetworks {
    fn counters(&self) -> Result<TrafficCounters, SchedulerError> {
        let networks = Networks::new_with_refreshed_list();
        if networks.is_empty() {
            return Err(SchedulerError::Backend(
                "no network interfaces reported".into(),
            ));
        }
        Ok(sum_interfaces(
            networks
                .iter()
                .map(|(name, data)| (name.as_str(), data.total_received(), data.total_transmitted())),
            self.include_loopback,
        ))
    }
}

/// Derives rates from successive reads of a [`TrafficSource`].
pub struct TrafficMeter<S> {
    source: S,
    clock: Arc<dyn Clock>,
    last: Mutex<Option<(u128, TrafficCounters)>>,
}

impl<S: TrafficSource> TrafficMeter<S> {
    /// Meter using the system clock.
    pub fn new(source: S) -> Self {
        Self::with_clock(source, Arc::new(SystemClock))
    }

    /// Meter using an injected clock.
    pub fn with_clock(source: S, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            clock,
            last: Mutex::new(None),
        }
    }

    /// Read counters and rates. Rates are zero on the first read and whenever no
    /// time has passed; a counter that went backwards reads as zero rate.
    pub fn read(&self) -> Option<TrafficStats> {
        let counters = match self.source.counters() {
            Ok(counters) => counters,
            Err(e) => {
                tracing::debug!(error = %e, "traffic counters unavailable");
                return None;
            }
        };
        let now = self.clock.now_ms();

        let mut last = self.last.lock();
        let (receive_rate_bps, send_rate_bps) = match *last {
            Some((then, previous)) if now > then => {
                #[allow(clippy::cast_precision_loss)]
                let secs = (now - then) as f64 / 1000.0;
                #[allow(clippy::cast_precision_loss)]
                let rate = |current: u64, before: u64| current.saturating_sub(before) as f64 / secs;
                (
                    rate(counters.bytes_received, previous.bytes_received),
                    rate(counters.bytes_sent, previous.bytes_sent),
                )
            }
            _ => (0.0, 0.0),
        };
        *last = Some((now, counters));

        Some(TrafficStats {
            counters,
            receive_rate_bps,
            send_rate_bps,
        })
    }
}

impl<S> std::fmt::Debug for TrafficMeter<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrafficMeter")
            .field("last", &*self.last.lock())
            .finish_non_exhaustive()
    }
}
