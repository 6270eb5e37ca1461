//! Tests for configuration validation and loading

use std::collections::HashMap;
use std::time::Duration;

use prometheus_ping_probe::config::probe::{ENV_HISTORY_CAPACITY, ENV_PERIOD_MS, ENV_TARGET};
use prometheus_ping_probe::config::ProbeConfig;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn test_defaults() {
    let cfg = ProbeConfig::default();
    assert_eq!(cfg.target, None);
    assert_eq!(cfg.period(), Duration::from_millis(1000));
    assert_eq!(cfg.timeout(), Duration::from_millis(1000));
    assert_eq!(cfg.history_capacity, 10);
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_zero_period_rejected() {
    let cfg = ProbeConfig::default().with_period_ms(0);
    assert!(cfg.validate().unwrap_err().contains("period_ms"));
}

#[test]
fn test_zero_timeout_rejected() {
    let cfg = ProbeConfig::default().with_timeout_ms(0);
    assert!(cfg.validate().is_err());
}

#[test]
fn test_zero_capacity_rejected() {
    let cfg = ProbeConfig::default().with_history_capacity(0);
    assert!(cfg.validate().is_err());
}

#[test]
fn test_blank_target_rejected() {
    let cfg = ProbeConfig::default().with_target("   ");
    assert!(cfg.validate().unwrap_err().contains("target"));
}

#[test]
fn test_from_json_str_fills_defaults() {
    let cfg = ProbeConfig::from_json_str(r#"{"target":"example.com","period_ms":500}"#).unwrap();
    assert_eq!(cfg.target.as_deref(), Some("example.com"));
    assert_eq!(cfg.period_ms, 500);
    assert_eq!(cfg.timeout_ms, 1000);
    assert_eq!(cfg.history_capacity, 10);
}

#[test]
fn test_from_json_str_rejects_invalid() {
    assert!(ProbeConfig::from_json_str(r#"{"period_ms":0}"#).is_err());
    let err = ProbeConfig::from_json_str("not json").unwrap_err();
    assert!(err.starts_with("parse error"));
}

#[test]
fn test_from_lookup_overrides() {
    let cfg = ProbeConfig::from_lookup(lookup(&[
        (ENV_TARGET, "10.0.0.1"),
        (ENV_PERIOD_MS, " 250 "),
        (ENV_HISTORY_CAPACITY, "20"),
    ]))
    .unwrap();
    assert_eq!(cfg.target.as_deref(), Some("10.0.0.1"));
    assert_eq!(cfg.period(), Duration::from_millis(250));
    assert_eq!(cfg.timeout_ms, 1000);
    assert_eq!(cfg.history_capacity, 20);
}

#[test]
fn test_from_lookup_rejects_non_numeric() {
    let err = ProbeConfig::from_lookup(lookup(&[(ENV_PERIOD_MS, "fast")])).unwrap_err();
    assert!(err.to_string().contains(ENV_PERIOD_MS));
}

#[test]
fn test_from_lookup_validates() {
    assert!(ProbeConfig::from_lookup(lookup(&[(ENV_PERIOD_MS, "0")])).is_err());
}
