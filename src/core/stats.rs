//! Probe scheduler counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Statistics about scheduler activity since construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeStats {
    /// Timer ticks handled while running.
    pub ticks: u64,
    /// Probes handed to the executor.
    pub probes_started: u64,
    /// Probes that returned a success.
    pub succeeded: u64,
    /// Probes that returned a failure.
    pub failed: u64,
    /// Ticks recorded as `ProbeAlreadyRunning` without probing.
    pub rejected: u64,
    /// Probe results dropped because their run had been stopped.
    pub discarded: u64,
}

/// Internal counters for scheduler statistics (thread-safe).
#[derive(Debug, Default)]
pub(crate) struct ProbeCounters {
    pub ticks: AtomicU64,
    pub probes_started: AtomicU64,
    pub succeeded: AtomicU64,
    pub failed: AtomicU64,
    pub rejected: AtomicU64,
    pub discarded: AtomicU64,
}

impl ProbeCounters {
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of current statistics.
    pub(crate) fn snapshot(&self) -> ProbeStats {
        ProbeStats {
            ticks: self.ticks.load(Ordering::Relaxed),
            probes_started: self.probes_started.load(Ordering::Relaxed),
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
        }
    }
}
