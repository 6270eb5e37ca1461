//! Tests for probe results and failure classification

use std::io;
use std::time::Duration;

use prometheus_ping_probe::core::{codes, ErrorCategory, ProbeResult, Target, FAILURE_CODES};

#[test]
fn test_table_codes_classify() {
    assert_eq!(ErrorCategory::classify(codes::TIMEOUT), ErrorCategory::Timeout);
    assert_eq!(
        ErrorCategory::classify(codes::PREVIOUS_PROBE_RUNNING),
        ErrorCategory::ProbeAlreadyRunning
    );
    assert_eq!(
        ErrorCategory::classify(codes::HOST_NOT_FOUND),
        ErrorCategory::HostUnresolvable
    );
    assert_eq!(
        ErrorCategory::classify(codes::HOST_UNKNOWN),
        ErrorCategory::HostUnreachable
    );
    assert_eq!(ErrorCategory::classify(codes::UNKNOWN), ErrorCategory::Unknown);
}

const EXPECTED: &[(&str, ErrorCategory)] = &[
    (codes::TIMEOUT, ErrorCategory::Timeout),
    (codes::PREVIOUS_PROBE_RUNNING, ErrorCategory::ProbeAlreadyRunning),
    (codes::HOST_NOT_SET, ErrorCategory::HostUnresolvable),
    (codes::HOST_NOT_FOUND, ErrorCategory::HostUnresolvable),
    (codes::DNS_RESOLUTION_FAILED, ErrorCategory::HostUnresolvable),
    (codes::HOST_UNKNOWN, ErrorCategory::HostUnreachable),
    (codes::HOST_UNREACHABLE, ErrorCategory::HostUnreachable),
    (codes::NETWORK_UNREACHABLE, ErrorCategory::HostUnreachable),
    (codes::CONNECTION_REFUSED, ErrorCategory::HostUnreachable),
    (codes::MALFORMED_REPLY, ErrorCategory::Unknown),
    (codes::SOCKET_UNAVAILABLE, ErrorCategory::Unknown),
    (codes::UNKNOWN, ErrorCategory::Unknown),
];

#[test]
fn test_every_code_maps_to_its_category() {
    for (code, expected) in EXPECTED {
        assert_eq!(ErrorCategory::classify(code), *expected, "code {code}");
    }
}

#[test]
fn test_expected_list_covers_failure_table() {
    assert_eq!(EXPECTED.len(), FAILURE_CODES.len());
    for (code, category) in FAILURE_CODES {
        assert!(
            EXPECTED.contains(&(*code, *category)),
            "{code} -> {category:?} missing from expected list"
        );
    }
}

#[test]
fn test_unmapped_code_is_unknown() {
    assert_eq!(ErrorCategory::classify("ESOMETHINGNEW"), ErrorCategory::Unknown);
    assert_eq!(ErrorCategory::classify(""), ErrorCategory::Unknown);
}

#[test]
fn test_every_category_reachable_from_table() {
    for category in ErrorCategory::ALL {
        assert!(
            FAILURE_CODES.iter().any(|(_, mapped)| *mapped == category),
            "{category:?} has no code"
        );
    }
}

#[test]
fn test_classify_io_kinds() {
    let timed_out = io::Error::new(io::ErrorKind::TimedOut, "slow");
    assert_eq!(ErrorCategory::classify_io(&timed_out), ErrorCategory::Timeout);

    let refused = io::Error::new(io::ErrorKind::ConnectionRefused, "no");
    assert_eq!(ErrorCategory::classify_io(&refused), ErrorCategory::HostUnreachable);

    let other = io::Error::other("weird");
    assert_eq!(ErrorCategory::classify_io(&other), ErrorCategory::Unknown);
}

#[test]
fn test_messages() {
    assert_eq!(ErrorCategory::Timeout.message(), "Request timed out");
    assert_eq!(
        ErrorCategory::ProbeAlreadyRunning.to_string(),
        "Previous probe is still running"
    );
}

#[test]
fn test_success_latency() {
    let result = ProbeResult::success(Duration::from_micros(12_500));
    assert_eq!(result.latency_ms(), Some(12.5));
    assert!(result.is_success());
    assert_eq!(result.category(), None);

    assert_eq!(ProbeResult::success_ms(-3.0).latency_ms(), Some(0.0));
}

#[test]
fn test_from_failure_code() {
    let result = ProbeResult::from_failure_code(codes::DNS_RESOLUTION_FAILED);
    assert_eq!(result.category(), Some(ErrorCategory::HostUnresolvable));
    assert_eq!(result.latency_ms(), None);
}

#[test]
fn test_result_serialization() {
    let json = serde_json::to_value(ProbeResult::failure(ErrorCategory::HostUnreachable)).unwrap();
    assert_eq!(json["outcome"], "failure");
    assert_eq!(json["category"], "host_unreachable");

    let json = serde_json::to_value(ProbeResult::success_ms(7.0)).unwrap();
    assert_eq!(json["outcome"], "success");
    assert_eq!(json["latency_ms"], 7.0);
}

#[test]
fn test_target_conversions() {
    let target = Target::from("example.com");
    assert_eq!(target.as_str(), "example.com");
    assert_eq!(target.to_string(), "example.com");
    assert_eq!(serde_json::to_string(&target).unwrap(), "\"example.com\"");
}
