//! Tests for runtime adapters

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use prometheus_ping_probe::core::{Spawn, TickFn, Ticker};
use prometheus_ping_probe::runtime::{ManualTicker, ModeNotifier, TokioSpawner, TokioTicker, VisualMode};
use prometheus_ping_probe::util::clock::Clock;

fn counting_tick() -> (TickFn, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let inner = Arc::clone(&count);
    let tick: TickFn = Arc::new(move || {
        inner.fetch_add(1, Ordering::SeqCst);
    });
    (tick, count)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_tokio_spawner_spawn() {
    let spawner = TokioSpawner::new(tokio::runtime::Handle::current());

    let (tx, rx) = tokio::sync::oneshot::channel();
    spawner.spawn(async move {
        tx.send(123).unwrap();
    });

    let result = rx.await.expect("oneshot result");
    assert_eq!(result, 123);
}

#[test]
fn test_current_outside_runtime_fails() {
    assert!(TokioSpawner::current().is_err());
    assert!(TokioTicker::current().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_tokio_ticker_cadence() {
    let ticker = TokioTicker::current().unwrap();
    let (tick, count) = counting_tick();
    let handle = ticker.arm(Duration::from_millis(100), tick);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(count.load(Ordering::SeqCst), 3);

    handle.cancel();
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(count.load(Ordering::SeqCst), 3);
}

#[test]
fn test_manual_ticker_multiple_timers_in_deadline_order() {
    let ticker = ManualTicker::new();
    let order = Arc::new(Mutex::new(Vec::new()));

    let fast_log = Arc::clone(&order);
    let fast: TickFn = Arc::new(move || fast_log.lock().push("fast"));
    let slow_log = Arc::clone(&order);
    let slow: TickFn = Arc::new(move || slow_log.lock().push("slow"));

    let _a = ticker.arm(Duration::from_millis(30), slow);
    let _b = ticker.arm(Duration::from_millis(20), fast);

    assert_eq!(ticker.advance(Duration::from_millis(60)), 5);
    // Equal deadlines fire in arming order.
    assert_eq!(*order.lock(), vec!["fast", "slow", "fast", "slow", "fast"]);
}

#[test]
fn test_manual_ticker_clock_follows_advance() {
    let ticker = ManualTicker::new();
    ticker.advance_periods(Duration::from_millis(250), 4);
    assert_eq!(ticker.elapsed(), Duration::from_secs(1));
    assert_eq!(ticker.now_ms(), 1000);
}

#[test]
fn test_mode_notifier_flags() {
    let notifier = ModeNotifier::default();
    assert_eq!(notifier.current(), VisualMode::Foreground);
    assert!(notifier.set_background(true));
    assert_eq!(notifier.current(), VisualMode::Background);
    assert!(notifier.set(VisualMode::Foreground));
}
