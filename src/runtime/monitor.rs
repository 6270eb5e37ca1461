//! Follow history updates and log each new record once.

use std::future::Future;

use crate::core::{ProbeExecutor, ProbeRecord, ProbeResult, ProbeScheduler, Spawn, Ticker};

use super::api::HistoryEntryView;

/// Remembers the newest tick already handed out.
///
/// Ticks restart at zero with each run, so call [`HistoryCursor::reset`] after a
/// restart.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoryCursor {
    last_tick: Option<u64>,
}

impl HistoryCursor {
    /// Records newer than the last call, oldest first.
    ///
    /// `records` is most-recent-first, as returned by [`ProbeScheduler::records`].
    pub fn take_new(&mut self, records: &[ProbeRecord]) -> Vec<ProbeRecord> {
        let fresh: Vec<ProbeRecord> = records
            .iter()
            .rev()
            .filter(|record| self.last_tick.is_none_or(|last| record.tick > last))
            .copied()
            .collect();
        if let Some(newest) = fresh.last() {
            self.last_tick = Some(newest.tick);
        }
        fresh
    }

    /// Forget progress, e.g. after a new run starts.
    pub fn reset(&mut self) {
        self.last_tick = None;
    }
}

/// Log every record the scheduler publishes until `shutdown` resolves.
///
/// Pending updates are drained before shutdown is honoured. Returns the number of
/// records logged.
pub async fn follow_history<E, S, T, F>(scheduler: &ProbeScheduler<E, S, T>, shutdown: F) -> u64
where
    E: ProbeExecutor,
    S: Spawn + Clone + Send + Sync + 'static,
    T: Ticker,
    F: Future<Output = ()>,
{
    let mut updates = scheduler.subscribe();
    let mut cursor = HistoryCursor::default();
    let mut logged = 0;
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                for record in cursor.take_new(&scheduler.records()) {
                    log_record(&record);
                    logged += 1;
                }
            }
            () = &mut shutdown => break,
        }
    }
    logged
}

fn log_record(record: &ProbeRecord) {
    let view = HistoryEntryView::from(record);
    match record.result {
        ProbeResult::Success { .. } => tracing::info!(tick = view.tick, "{}", view.message),
        ProbeResult::Failure { .. } => tracing::warn!(tick = view.tick, "{}", view.message),
    }
}
