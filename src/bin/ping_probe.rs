//! Command-line prober.
//!
//! Reads `PING_PROBE_*` settings (and `.env`), probes the target every period,
//! and logs each new history entry until interrupted.
//!
//! ```text
//! PING_PROBE_TARGET=example.com RUST_LOG=info cargo run --bin ping_probe
//! ```

use anyhow::Context;

use prometheus_ping_probe::builders::SchedulerBuilder;
use prometheus_ping_probe::config::ProbeConfig;
use prometheus_ping_probe::core::AppResult;
use prometheus_ping_probe::infra::IcmpExecutor;
use prometheus_ping_probe::runtime::{follow_history, TokioSpawner, TokioTicker};
use prometheus_ping_probe::util::init_tracing;

#[tokio::main]
async fn main() -> AppResult<()> {
    init_tracing();

    let config = ProbeConfig::from_env().context("loading configuration")?;
    let target = config
        .target
        .clone()
        .or_else(|| std::env::args().nth(1))
        .context("no target: set PING_PROBE_TARGET or pass a host argument")?;

    let scheduler = SchedulerBuilder::new(config.clone()).build(
        IcmpExecutor::new(),
        TokioSpawner::current()?,
        TokioTicker::current()?,
    )?;
    scheduler.start(target.as_str(), config.period())?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };
    let logged = follow_history(&scheduler, shutdown).await;

    scheduler.stop()?;
    let stats = scheduler.stats();
    tracing::info!(
        ticks = stats.ticks,
        succeeded = stats.succeeded,
        failed = stats.failed,
        rejected = stats.rejected,
        logged,
        "shutting down"
    );
    Ok(())
}
