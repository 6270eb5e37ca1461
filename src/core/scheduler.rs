//! Fixed-cadence, single-flight probe scheduler.
//!
//! The scheduler owns three pieces of state behind one `parking_lot::Mutex`: the
//! active run (target, period, timer, tick counter, reorder buffer), the in-flight
//! marker, and the order in which results reach the history buffer. Ticks come
//! from an injected [`Ticker`]; probes run on an injected [`Spawn`] so they never
//! delay the next tick.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use uuid::Uuid;

use super::executor::probe_within;
use super::sequencer::TickSequencer;
use super::stats::{ProbeCounters, ProbeStats};
use super::timer::{TickFn, Ticker, TimerHandle};
use super::{
    ErrorCategory, History, ProbeExecutor, ProbeRecord, ProbeResult, SchedulerError, Spawn,
    Target, DEFAULT_HISTORY_CAPACITY,
};
use crate::util::clock::{Clock, SystemClock};

/// Default tick period (1 second).
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(1000);

/// Default per-probe deadline (1 second).
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(1000);

/// Lifecycle state of a [`ProbeScheduler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerState {
    /// Not probing.
    Idle,
    /// Probing `target` every `period`.
    Running {
        /// Host being probed.
        target: Target,
        /// Tick period, fixed for the life of the run.
        period: Duration,
    },
}

impl SchedulerState {
    /// Lowercase state name used in errors and logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running { .. } => "running",
        }
    }

    /// True for [`SchedulerState::Running`].
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }
}

/// Tunables fixed at construction.
#[derive(Clone)]
pub struct SchedulerOptions {
    /// Deadline passed to every executor invocation.
    pub probe_timeout: Duration,
    /// History buffer capacity.
    pub history_capacity: usize,
    /// Timestamp source for probe records.
    pub clock: Arc<dyn Clock>,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            clock: Arc::new(SystemClock),
        }
    }
}

impl fmt::Debug for SchedulerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchedulerOptions")
            .field("probe_timeout", &self.probe_timeout)
            .field("history_capacity", &self.history_capacity)
            .finish_non_exhaustive()
    }
}

struct ActiveRun {
    id: Uuid,
    target: Target,
    period: Duration,
    timer: Option<TimerHandle>,
    next_tick: u64,
    sequencer: TickSequencer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    run_id: Uuid,
    tick: u64,
}

struct Inner {
    run: Option<ActiveRun>,
    /// Outstanding executor call, possibly from an already-stopped run.
    in_flight: Option<InFlight>,
}

struct Shared {
    inner: Mutex<Inner>,
    history: Mutex<History<ProbeRecord>>,
    counters: ProbeCounters,
    revision: watch::Sender<u64>,
    clock: Arc<dyn Clock>,
}

impl Shared {
    /// Push released records into history, oldest first.
    ///
    /// Callers hold `inner` so releases from concurrent completions stay in tick order.
    fn publish(&self, records: Vec<ProbeRecord>) {
        if records.is_empty() {
            return;
        }
        let released = records.len() as u64;
        {
            let mut history = self.history.lock();
            for record in records {
                history.push(record);
            }
        }
        self.revision
            .send_modify(|revision| *revision = revision.wrapping_add(released));
    }
}

/// Drives a [`ProbeExecutor`] on a fixed period against one target at a time.
///
/// # Example
///
/// ```rust,ignore
/// use std::time::Duration;
/// use prometheus_ping_probe::core::ProbeScheduler;
/// use prometheus_ping_probe::infra::IcmpExecutor;
/// use prometheus_ping_probe::runtime::{TokioSpawner, TokioTicker};
///
/// let handle = tokio::runtime::Handle::current();
/// let scheduler = ProbeScheduler::new(
///     IcmpExecutor::new(),
///     TokioSpawner::new(handle.clone()),
///     TokioTicker::new(handle),
/// );
/// scheduler.start("example.com", Duration::from_secs(1))?;
/// // ...
/// let latest = scheduler.snapshot();
/// scheduler.stop()?;
/// ```
pub struct ProbeScheduler<E, S, T> {
    executor: E,
    spawner: S,
    ticker: T,
    probe_timeout: Duration,
    shared: Arc<Shared>,
}

impl<E, S, T> ProbeScheduler<E, S, T>
where
    E: ProbeExecutor,
    S: Spawn + Clone + Send + Sync + 'static,
    T: Ticker,
{
    /// Create an idle scheduler with default options.
    pub fn new(executor: E, spawner: S, ticker: T) -> Self {
        Self::with_options(executor, spawner, ticker, SchedulerOptions::default())
    }

    /// Create an idle scheduler with explicit options.
    pub fn with_options(executor: E, spawner: S, ticker: T, options: SchedulerOptions) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            executor,
            spawner,
            ticker,
            probe_timeout: options.probe_timeout,
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    run: None,
                    in_flight: None,
                }),
                history: Mutex::new(History::new(options.history_capacity)),
                counters: ProbeCounters::default(),
                revision,
                clock: options.clock,
            }),
        }
    }

    /// Begin probing `target` every `period`. The first probe fires after one period.
    ///
    /// # Errors
    /// - [`SchedulerError::InvalidState`] if already running.
    /// - [`SchedulerError::InvalidConfig`] if `period` is zero.
    pub fn start(&self, target: impl Into<Target>, period: Duration) -> Result<(), SchedulerError> {
        let target = target.into();
        if period.is_zero() {
            return Err(SchedulerError::InvalidConfig(
                "period must be greater than 0".into(),
            ));
        }

        let mut inner = self.shared.inner.lock();
        if inner.run.is_some() {
            tracing::warn!(host = %target, "start rejected: scheduler already running");
            return Err(SchedulerError::InvalidState {
                operation: "start",
                state: "running",
            });
        }

        let id = Uuid::new_v4();
        let timer = self.ticker.arm(period, self.tick_fn(id));
        tracing::info!(
            run_id = %id,
            host = %target,
            period_ms = period.as_millis(),
            timeout_ms = self.probe_timeout.as_millis(),
            "probe scheduler started"
        );
        inner.run = Some(ActiveRun {
            id,
            target,
            period,
            timer: Some(timer),
            next_tick: 0,
            sequencer: TickSequencer::default(),
        });
        Ok(())
    }

    /// Stop probing. The timer is cancelled before this returns; a probe still in
    /// flight is left to finish and its result is discarded.
    ///
    /// # Errors
    /// [`SchedulerError::InvalidState`] if idle.
    pub fn stop(&self) -> Result<(), SchedulerError> {
        let mut guard = self.shared.inner.lock();
        let inner = &mut *guard;
        let Some(mut run) = inner.run.take() else {
            tracing::warn!("stop rejected: scheduler idle");
            return Err(SchedulerError::InvalidState {
                operation: "stop",
                state: "idle",
            });
        };

        if let Some(timer) = run.timer.take() {
            timer.cancel();
        }
        if let Some(flight) = inner.in_flight.filter(|f| f.run_id == run.id) {
            let released = run.sequencer.abandon(flight.tick);
            self.shared.publish(released);
        }
        drop(guard);

        tracing::info!(
            run_id = %run.id,
            host = %run.target,
            ticks = run.next_tick,
            "probe scheduler stopped"
        );
        Ok(())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SchedulerState {
        self.shared
            .inner
            .lock()
            .run
            .as_ref()
            .map_or(SchedulerState::Idle, |run| SchedulerState::Running {
                target: run.target.clone(),
                period: run.period,
            })
    }

    /// True while running.
    pub fn is_running(&self) -> bool {
        self.shared.inner.lock().run.is_some()
    }

    /// True while an executor call is outstanding, including one from a stopped run.
    pub fn probe_in_flight(&self) -> bool {
        self.shared.inner.lock().in_flight.is_some()
    }

    /// Recorded results, most-recent-first.
    pub fn snapshot(&self) -> Vec<ProbeResult> {
        self.shared
            .history
            .lock()
            .iter()
            .map(|record| record.result)
            .collect()
    }

    /// Recorded results with tick and timing metadata, most-recent-first.
    pub fn records(&self) -> Vec<ProbeRecord> {
        self.shared.history.lock().snapshot()
    }

    /// History capacity.
    pub fn history_capacity(&self) -> usize {
        self.shared.history.lock().capacity()
    }

    /// Deadline passed to the executor.
    pub const fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    /// Counter snapshot.
    pub fn stats(&self) -> ProbeStats {
        self.shared.counters.snapshot()
    }

    /// Revision counter bumped once per history push.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.shared.revision.subscribe()
    }

    fn tick_fn(&self, run_id: Uuid) -> TickFn {
        let shared = Arc::clone(&self.shared);
        let executor = self.executor.clone();
        let spawner = self.spawner.clone();
        let timeout = self.probe_timeout;
        Arc::new(move || on_tick(&shared, &executor, &spawner, timeout, run_id))
    }
}

impl<E, S, T> Drop for ProbeScheduler<E, S, T> {
    fn drop(&mut self) {
        // The tick callback holds `shared`; cancel so the timer does not outlive us.
        let run = self.shared.inner.lock().run.take();
        if let Some(timer) = run.and_then(|mut run| run.timer.take()) {
            timer.cancel();
        }
    }
}

impl<E, S, T> fmt::Debug for ProbeScheduler<E, S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.shared.inner.lock();
        f.debug_struct("ProbeScheduler")
            .field("running", &inner.run.is_some())
            .field("in_flight", &inner.in_flight.is_some())
            .field("probe_timeout", &self.probe_timeout)
            .finish_non_exhaustive()
    }
}

fn on_tick<E, S>(shared: &Arc<Shared>, executor: &E, spawner: &S, timeout: Duration, run_id: Uuid)
where
    E: ProbeExecutor,
    S: Spawn,
{
    let scheduled_at_ms = shared.clock.now_ms();
    let dispatch = {
        let mut guard = shared.inner.lock();
        let inner = &mut *guard;
        let Some(run) = inner.run.as_mut().filter(|run| run.id == run_id) else {
            tracing::trace!(run_id = %run_id, "tick for inactive run ignored");
            return;
        };

        ProbeCounters::bump(&shared.counters.ticks);
        let tick = run.next_tick;
        run.next_tick += 1;

        if let Some(busy) = inner.in_flight {
            ProbeCounters::bump(&shared.counters.rejected);
            tracing::debug!(
                run_id = %run_id,
                tick,
                in_flight_tick = busy.tick,
                "previous probe still running"
            );
            let released = run.sequencer.complete(ProbeRecord {
                tick,
                scheduled_at_ms,
                completed_at_ms: scheduled_at_ms,
                result: ProbeResult::failure(ErrorCategory::ProbeAlreadyRunning),
            });
            shared.publish(released);
            None
        } else {
            inner.in_flight = Some(InFlight { run_id, tick });
            run.sequencer.reserve(tick);
            Some((tick, run.target.clone()))
        }
    };

    let Some((tick, target)) = dispatch else {
        return;
    };
    ProbeCounters::bump(&shared.counters.probes_started);
    tracing::debug!(run_id = %run_id, tick, host = %target, "dispatching probe");

    let shared = Arc::clone(shared);
    let executor = executor.clone();
    spawner.spawn(async move {
        let result = probe_within(&executor, &target, timeout).await;
        finish_probe(&shared, run_id, tick, scheduled_at_ms, result);
    });
}

fn finish_probe(shared: &Shared, run_id: Uuid, tick: u64, scheduled_at_ms: u128, result: ProbeResult) {
    let completed_at_ms = shared.clock.now_ms();
    let mut guard = shared.inner.lock();
    let inner = &mut *guard;
    if inner.in_flight == Some(InFlight { run_id, tick }) {
        inner.in_flight = None;
    }

    let Some(run) = inner.run.as_mut().filter(|run| run.id == run_id) else {
        ProbeCounters::bump(&shared.counters.discarded);
        tracing::debug!(run_id = %run_id, tick, ?result, "discarding probe result from stopped run");
        return;
    };

    if result.is_success() {
        ProbeCounters::bump(&shared.counters.succeeded);
    } else {
        ProbeCounters::bump(&shared.counters.failed);
    }
    match result {
        ProbeResult::Success { latency_ms } => {
            tracing::debug!(run_id = %run_id, tick, latency_ms, "probe succeeded");
        }
        ProbeResult::Failure { category } => {
            tracing::warn!(
                run_id = %run_id,
                tick,
                host = %run.target,
                category = category.as_str(),
                "probe failed"
            );
        }
    }

    let released = run.sequencer.complete(ProbeRecord {
        tick,
        scheduled_at_ms,
        completed_at_ms,
        result,
    });
    shared.publish(released);
}
