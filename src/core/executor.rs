//! Probe execution traits and the runtime spawn seam.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use super::{ErrorCategory, ProbeResult, Target};

/// Performs exactly one latency measurement against a host.
///
/// Implementations must return within `timeout`, must classify every failure into
/// a [`ProbeResult::Failure`] rather than returning raw platform errors, and must not
/// retry. Retrying is the scheduler's next tick.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use async_trait::async_trait;
/// use prometheus_ping_probe::core::{ProbeExecutor, ProbeResult, Target};
///
/// #[derive(Clone)]
/// struct Loopback;
///
/// #[async_trait]
/// impl ProbeExecutor for Loopback {
///     async fn probe(&self, _target: &Target, _timeout: Duration) -> ProbeResult {
///         ProbeResult::success_ms(0.1)
///     }
/// }
/// ```
#[async_trait]
pub trait ProbeExecutor: Send + Sync + Clone + 'static {
    /// Probe `target` once, finishing within `timeout`.
    async fn probe(&self, target: &Target, timeout: Duration) -> ProbeResult;
}

/// Run one probe and enforce the deadline regardless of executor behavior.
///
/// An executor that overruns `timeout` yields `Failure{Timeout}`.
pub async fn probe_within<E: ProbeExecutor>(
    executor: &E,
    target: &Target,
    timeout: Duration,
) -> ProbeResult {
    match tokio::time::timeout(timeout, executor.probe(target, timeout)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::debug!(host = %target, ?timeout, "executor overran probe deadline");
            ProbeResult::failure(ErrorCategory::Timeout)
        }
    }
}

/// Abstraction for spawning probe execution on a runtime.
pub trait Spawn {
    /// Spawn an async task that returns a future.
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static;
}
