//! Error types for scheduler operations.

use thiserror::Error;

/// Errors produced by scheduler components.
///
/// Probe outcomes never surface here; they are recorded in history as
/// [`ProbeResult`](crate::core::ProbeResult) values. These errors cover misuse of
/// the control surface and infrastructure failures around it.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Operation is not allowed in the scheduler's current state.
    #[error("invalid state: cannot {operation} while {state}")]
    InvalidState {
        /// Operation that was attempted (`start`, `stop`).
        operation: &'static str,
        /// State the scheduler was in.
        state: &'static str,
    },
    /// Configuration value rejected by validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// I/O failure in a platform adapter.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Backend-specific failure with context.
    #[error("backend error: {0}")]
    Backend(String),
}

impl SchedulerError {
    /// Returns true for start/stop misuse.
    pub const fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState { .. })
    }
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
