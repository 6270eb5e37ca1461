//! # Prometheus Ping Probe
//!
//! A fixed-cadence, single-flight network reachability prober.
//!
//! A [`ProbeScheduler`](core::ProbeScheduler) fires a tick every period while
//! running. Each tick launches at most one probe against the configured target
//! through a [`ProbeExecutor`](core::ProbeExecutor); a tick that lands while the
//! previous probe is still outstanding records a `ProbeAlreadyRunning` failure
//! instead. Results enter a bounded, most-recent-first history in tick order.
//!
//! ## Key Features
//!
//! - **Drift-free cadence**: ticks come from a repeating timer, never from probe completion
//! - **Single-flight**: one outstanding probe per scheduler
//! - **Closed failure taxonomy**: platform errors map to five categories, unknown codes to `Unknown`
//! - **Injectable time**: [`ManualTicker`](runtime::ManualTicker) drives ticks deterministically in tests
//! - **ICMP executor** (feature `icmp`): single echo request via `surge-ping`
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use prometheus_ping_probe::core::ProbeScheduler;
//! use prometheus_ping_probe::infra::IcmpExecutor;
//! use prometheus_ping_probe::runtime::{TokioSpawner, TokioTicker};
//!
//! let scheduler = ProbeScheduler::new(
//!     IcmpExecutor::new(),
//!     TokioSpawner::current()?,
//!     TokioTicker::current()?,
//! );
//! scheduler.start("example.com", Duration::from_secs(1))?;
//! let mut updates = scheduler.subscribe();
//! updates.changed().await?;
//! println!("{:?}", scheduler.snapshot());
//! scheduler.stop()?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Probe model, history, failure classification, and the scheduler.
pub mod core;
/// Configuration models for cadence, deadlines, and history size.
pub mod config;
/// Builders to construct schedulers from configuration.
pub mod builders;
/// Infrastructure adapters: ICMP executor and traffic counters.
pub mod infra;
/// Runtime adapters (tokio, manual time) and the presentation-facing API surface.
pub mod runtime;
/// Shared utilities.
pub mod util;
