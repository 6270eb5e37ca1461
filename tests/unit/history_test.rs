//! Tests for the bounded history buffer

use prometheus_ping_probe::core::{ErrorCategory, History, ProbeResult, DEFAULT_HISTORY_CAPACITY};

#[test]
fn test_most_recent_first() {
    let mut history = History::new(3);
    history.push(1);
    history.push(2);
    assert_eq!(history.snapshot(), vec![2, 1]);
    assert_eq!(history.head(), Some(&2));
}

#[test]
fn test_evicts_oldest_at_capacity() {
    let mut history = History::new(DEFAULT_HISTORY_CAPACITY);
    for i in 0..12 {
        history.push(i);
    }
    assert_eq!(history.len(), 10);
    assert_eq!(history.snapshot(), (2..12).rev().collect::<Vec<_>>());
}

#[test]
fn test_len_never_exceeds_capacity() {
    for capacity in 1..=5 {
        let mut history = History::new(capacity);
        for i in 0..20 {
            history.push(ProbeResult::failure(ErrorCategory::Timeout));
            assert!(history.len() <= capacity, "capacity {capacity} after {i} pushes");
        }
        assert_eq!(history.len(), capacity);
    }
}

#[test]
fn test_default_capacity() {
    let history: History<ProbeResult> = History::default();
    assert_eq!(history.capacity(), DEFAULT_HISTORY_CAPACITY);
    assert!(history.is_empty());
}
