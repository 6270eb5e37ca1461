//! Tests for builder modules

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use prometheus_ping_probe::builders::SchedulerBuilder;
use prometheus_ping_probe::config::ProbeConfig;
use prometheus_ping_probe::core::{ProbeExecutor, ProbeResult, SchedulerError, Spawn, Target};
use prometheus_ping_probe::runtime::ManualTicker;
use prometheus_ping_probe::util::clock::Clock;

#[derive(Clone)]
struct NoopExecutor;

#[async_trait]
impl ProbeExecutor for NoopExecutor {
    async fn probe(&self, _target: &Target, _timeout: Duration) -> ProbeResult {
        ProbeResult::success_ms(1.0)
    }
}

#[derive(Clone)]
struct DropSpawner;

impl Spawn for DropSpawner {
    fn spawn<F>(&self, _fut: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
    }
}

#[test]
fn test_builder_applies_config() {
    let config = ProbeConfig::default()
        .with_timeout_ms(250)
        .with_history_capacity(4);
    let builder = SchedulerBuilder::new(config);
    assert_eq!(builder.config().timeout_ms, 250);

    let scheduler = builder
        .build(NoopExecutor, DropSpawner, ManualTicker::new())
        .unwrap();
    assert_eq!(scheduler.probe_timeout(), Duration::from_millis(250));
    assert_eq!(scheduler.history_capacity(), 4);
    assert!(!scheduler.is_running());
}

#[test]
fn test_builder_rejects_invalid_config() {
    let builder = SchedulerBuilder::new(ProbeConfig::default().with_timeout_ms(0));
    let err = builder
        .build(NoopExecutor, DropSpawner, ManualTicker::new())
        .unwrap_err();
    assert!(matches!(err, SchedulerError::InvalidConfig(ref msg) if msg.starts_with("config invalid")));
}

#[test]
fn test_builder_uses_injected_clock() {
    let ticker = ManualTicker::new();
    let options = SchedulerBuilder::new(ProbeConfig::default())
        .with_clock(Arc::new(ticker.clone()))
        .options();
    ticker.advance(Duration::from_millis(1500));
    assert_eq!(options.clock.now_ms(), 1500);
}
