//! API-facing request/response models for the presentation layer.
//!
//! The presentation layer may only start, stop, and read history. These helpers
//! wrap those three calls with serializable request and view types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{
    ErrorCategory, ProbeExecutor, ProbeRecord, ProbeResult, ProbeScheduler, ProbeStats,
    SchedulerError, SchedulerState, Spawn, Ticker, DEFAULT_PERIOD,
};

/// Start payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartRequest {
    /// Host to probe.
    pub target: String,
    /// Tick period in milliseconds; defaults to 1000.
    #[serde(default)]
    pub period_ms: Option<u64>,
}

impl StartRequest {
    /// Request with the default period.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            period_ms: None,
        }
    }

    /// Effective period.
    pub fn period(&self) -> Duration {
        self.period_ms.map_or(DEFAULT_PERIOD, Duration::from_millis)
    }
}

/// One history row ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntryView {
    /// Tick sequence number within the run.
    pub tick: u64,
    /// When the tick fired (ms).
    pub at_ms: u128,
    /// `true` for a completed round trip.
    pub ok: bool,
    /// Round-trip time for successes.
    pub latency_ms: Option<f64>,
    /// Failure category code for failures.
    pub category: Option<ErrorCategory>,
    /// Display text.
    pub message: String,
}

impl From<&ProbeRecord> for HistoryEntryView {
    fn from(record: &ProbeRecord) -> Self {
        let message = match record.result {
            ProbeResult::Success { latency_ms } => format!("{latency_ms:.0} ms"),
            ProbeResult::Failure { category } => category.message().to_string(),
        };
        Self {
            tick: record.tick,
            at_ms: record.scheduled_at_ms,
            ok: record.result.is_success(),
            latency_ms: record.result.latency_ms(),
            category: record.result.category(),
            message,
        }
    }
}

/// History listing, most-recent-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryView {
    /// Rows, newest first.
    pub entries: Vec<HistoryEntryView>,
    /// Maximum rows kept.
    pub capacity: usize,
}

/// Scheduler status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusView {
    /// Whether probing is active.
    pub running: bool,
    /// Host being probed.
    pub target: Option<String>,
    /// Tick period in milliseconds.
    pub period_ms: Option<u64>,
    /// Counters.
    pub stats: ProbeStats,
}

/// Health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    /// Healthy flag.
    pub ok: bool,
}

/// Start probing per `req`.
///
/// # Errors
/// Propagates [`ProbeScheduler::start`] errors.
pub fn start<E, S, T>(
    scheduler: &ProbeScheduler<E, S, T>,
    req: &StartRequest,
) -> Result<StatusView, SchedulerError>
where
    E: ProbeExecutor,
    S: Spawn + Clone + Send + Sync + 'static,
    T: Ticker,
{
    scheduler.start(req.target.as_str(), req.period())?;
    Ok(status(scheduler))
}

/// Stop probing.
///
/// # Errors
/// Propagates [`ProbeScheduler::stop`] errors.
pub fn stop<E, S, T>(scheduler: &ProbeScheduler<E, S, T>) -> Result<StatusView, SchedulerError>
where
    E: ProbeExecutor,
    S: Spawn + Clone + Send + Sync + 'static,
    T: Ticker,
{
    scheduler.stop()?;
    Ok(status(scheduler))
}

/// Current status.
pub fn status<E, S, T>(scheduler: &ProbeScheduler<E, S, T>) -> StatusView
where
    E: ProbeExecutor,
    S: Spawn + Clone + Send + Sync + 'static,
    T: Ticker,
{
    let (target, period_ms) = match scheduler.state() {
        SchedulerState::Idle => (None, None),
        SchedulerState::Running { target, period } => (
            Some(target.to_string()),
            Some(u64::try_from(period.as_millis()).unwrap_or(u64::MAX)),
        ),
    };
    StatusView {
        running: target.is_some(),
        target,
        period_ms,
        stats: scheduler.stats(),
    }
}

/// Current history for display.
pub fn history_view<E, S, T>(scheduler: &ProbeScheduler<E, S, T>) -> HistoryView
where
    E: ProbeExecutor,
    S: Spawn + Clone + Send + Sync + 'static,
    T: Ticker,
{
    HistoryView {
        entries: scheduler.records().iter().map(HistoryEntryView::from).collect(),
        capacity: scheduler.history_capacity(),
    }
}

/// Return a health payload.
pub const fn health() -> Health {
    Health { ok: true }
}
