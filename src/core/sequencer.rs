//! Tick-ordered release of probe results.
//!
//! Probe I/O can finish out of order relative to the ticks that started it: a
//! `ProbeAlreadyRunning` rejection for tick k is known immediately while the genuine
//! result for tick k-1 is still in flight. The sequencer holds results back until
//! every earlier tick has either completed or been abandoned.

use std::collections::BTreeMap;

use super::ProbeRecord;

#[derive(Debug)]
enum Slot {
    Pending,
    Ready(ProbeRecord),
    Abandoned,
}

/// Reorder buffer keyed by tick sequence number.
#[derive(Debug, Default)]
pub(crate) struct TickSequencer {
    slots: BTreeMap<u64, Slot>,
}

impl TickSequencer {
    /// Reserve a slot for a tick whose result is not yet known.
    pub(crate) fn reserve(&mut self, tick: u64) {
        self.slots.insert(tick, Slot::Pending);
    }

    /// Fill a tick's slot and return every record now releasable, oldest first.
    pub(crate) fn complete(&mut self, record: ProbeRecord) -> Vec<ProbeRecord> {
        self.slots.insert(record.tick, Slot::Ready(record));
        self.drain_ready()
    }

    /// Drop a pending tick's slot and return every record it was blocking.
    pub(crate) fn abandon(&mut self, tick: u64) -> Vec<ProbeRecord> {
        if let Some(slot) = self.slots.get_mut(&tick) {
            *slot = Slot::Abandoned;
        }
        self.drain_ready()
    }

    /// Number of ticks not yet released.
    #[cfg(test)]
    pub(crate) fn pending(&self) -> usize {
        self.slots.len()
    }

    fn drain_ready(&mut self) -> Vec<ProbeRecord> {
        let mut released = Vec::new();
        while let Some(entry) = self.slots.first_entry() {
            if matches!(entry.get(), Slot::Pending) {
                break;
            }
            if let Slot::Ready(record) = entry.remove() {
                released.push(record);
            }
        }
        released
    }
}
