//! Core probe model, history, and scheduling.

pub mod error;
pub mod executor;
pub mod history;
pub mod result;
pub mod scheduler;
mod sequencer;
pub mod stats;
pub mod timer;

pub use error::{AppResult, SchedulerError};
pub use executor::{probe_within, ProbeExecutor, Spawn};
pub use history::{History, DEFAULT_HISTORY_CAPACITY};
pub use result::{codes, ErrorCategory, ProbeRecord, ProbeResult, Target, FAILURE_CODES};
pub use scheduler::{
    ProbeScheduler, SchedulerOptions, SchedulerState, DEFAULT_PERIOD, DEFAULT_PROBE_TIMEOUT,
};
pub use stats::ProbeStats;
pub use timer::{TickFn, Ticker, TimerHandle};
