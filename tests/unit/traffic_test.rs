//! Tests for the traffic meter

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use prometheus_ping_probe::core::SchedulerError;
use prometheus_ping_probe::infra::traffic::sum_interfaces;
use prometheus_ping_probe::infra::{SystemNetworks, TrafficCounters, TrafficMeter, TrafficSource};
use prometheus_ping_probe::runtime::ManualTicker;

#[derive(Clone, Default)]
struct FakeSource {
    counters: Arc<Mutex<Option<TrafficCounters>>>,
}

impl FakeSource {
    fn set(&self, bytes_received: u64, bytes_sent: u64) {
        *self.counters.lock() = Some(TrafficCounters {
            bytes_received,
            bytes_sent,
        });
    }
}

impl TrafficSource for FakeSource {
    fn counters(&self) -> Result<TrafficCounters, SchedulerError> {
        self.counters
            .lock()
            .ok_or_else(|| SchedulerError::Backend("no counters".into()))
    }
}

#[test]
fn test_first_read_has_zero_rates() {
    let source = FakeSource::default();
    source.set(1000, 500);
    let meter = TrafficMeter::with_clock(source, Arc::new(ManualTicker::new()));

    let stats = meter.read().unwrap();
    assert_eq!(stats.counters.bytes_received, 1000);
    assert_eq!(stats.receive_rate_bps, 0.0);
    assert_eq!(stats.send_rate_bps, 0.0);
}

#[test]
fn test_rates_from_successive_reads() {
    let ticker = ManualTicker::new();
    let source = FakeSource::default();
    let meter = TrafficMeter::with_clock(source.clone(), Arc::new(ticker.clone()));

    source.set(1000, 500);
    meter.read().unwrap();

    ticker.advance(Duration::from_secs(2));
    source.set(5000, 1500);
    let stats = meter.read().unwrap();
    assert_eq!(stats.receive_rate_bps, 2000.0);
    assert_eq!(stats.send_rate_bps, 500.0);
}

#[test]
fn test_counter_reset_reads_as_zero_rate() {
    let ticker = ManualTicker::new();
    let source = FakeSource::default();
    let meter = TrafficMeter::with_clock(source.clone(), Arc::new(ticker.clone()));

    source.set(9000, 9000);
    meter.read().unwrap();
    ticker.advance(Duration::from_secs(1));
    source.set(100, 100);

    let stats = meter.read().unwrap();
    assert_eq!(stats.receive_rate_bps, 0.0);
    assert_eq!(stats.send_rate_bps, 0.0);
}

#[test]
fn test_unavailable_source_reads_as_none() {
    let meter = TrafficMeter::new(FakeSource::default());
    assert!(meter.read().is_none());
}

#[test]
fn test_no_interfaces_sums_to_zero() {
    let counters = sum_interfaces(std::iter::empty(), true);
    assert_eq!(counters, TrafficCounters::default());
}

#[test]
fn test_system_networks_read_does_not_panic() {
    // Hosts without interfaces report an error; either way the meter stays usable.
    let meter = TrafficMeter::new(SystemNetworks::new());
    if let Some(stats) = meter.read() {
        assert_eq!(stats.receive_rate_bps, 0.0);
    }
    let _ = SystemNetworks::new().with_loopback(true).counters();
}
