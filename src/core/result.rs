//! Probe outcome model and failure classification.
//!
//! Every failure signal a platform can raise is reduced to a string code and
//! looked up in [`FAILURE_CODES`]. Codes that are not in the table classify as
//! [`ErrorCategory::Unknown`], so raw platform codes never reach history.

use std::fmt;
use std::io;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Opaque host identifier (hostname or address literal).
///
/// The scheduler never parses it; executors validate it at probe time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Target(String);

impl Target {
    /// Wrap a host string.
    pub fn new(host: impl Into<String>) -> Self {
        Self(host.into())
    }

    /// Host string as supplied by the user.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Target {
    fn from(host: &str) -> Self {
        Self::new(host)
    }
}

impl From<String> for Target {
    fn from(host: String) -> Self {
        Self(host)
    }
}

/// User-facing failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// No reply before the deadline.
    Timeout,
    /// A previous probe was still in flight when the tick fired.
    ProbeAlreadyRunning,
    /// Name lookup failed.
    HostUnresolvable,
    /// No route to the host, or another host-level failure.
    HostUnreachable,
    /// Any failure without a known mapping.
    Unknown,
}

impl ErrorCategory {
    /// All categories, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Timeout,
        Self::ProbeAlreadyRunning,
        Self::HostUnresolvable,
        Self::HostUnreachable,
        Self::Unknown,
    ];

    /// Stable machine-readable code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::ProbeAlreadyRunning => "probe_already_running",
            Self::HostUnresolvable => "host_unresolvable",
            Self::HostUnreachable => "host_unreachable",
            Self::Unknown => "unknown",
        }
    }

    /// Display text for the presentation layer.
    pub const fn message(self) -> &'static str {
        match self {
            Self::Timeout => "Request timed out",
            Self::ProbeAlreadyRunning => "Previous probe is still running",
            Self::HostUnresolvable => "Host name could not be resolved",
            Self::HostUnreachable => "Host is unreachable",
            Self::Unknown => "Unknown error",
        }
    }

    /// Map a raw platform failure code to its category.
    ///
    /// Total: codes missing from [`FAILURE_CODES`] map to [`ErrorCategory::Unknown`].
    pub fn classify(code: &str) -> Self {
        FAILURE_CODES
            .iter()
            .find(|(known, _)| *known == code)
            .map_or(Self::Unknown, |(_, category)| *category)
    }

    /// Classify an I/O error raised while resolving or probing a host.
    pub fn classify_io(err: &io::Error) -> Self {
        Self::classify(io_failure_code(err.kind()))
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Raw platform failure codes understood by [`ErrorCategory::classify`].
pub mod codes {
    /// Deadline elapsed before a reply arrived.
    pub const TIMEOUT: &str = "timeout";
    /// Probe primitive refused because another request is outstanding.
    pub const PREVIOUS_PROBE_RUNNING: &str = "previous_probe_running";
    /// No host was supplied.
    pub const HOST_NOT_SET: &str = "host_not_set";
    /// Name lookup returned no records.
    pub const HOST_NOT_FOUND: &str = "host_not_found";
    /// Resolver failed outright.
    pub const DNS_RESOLUTION_FAILED: &str = "dns_resolution_failed";
    /// Host rejected or dropped the request for an unspecified reason.
    pub const HOST_UNKNOWN: &str = "host_unknown";
    /// Local routing table has no route to the host.
    pub const HOST_UNREACHABLE: &str = "host_unreachable";
    /// Local network is down or unreachable.
    pub const NETWORK_UNREACHABLE: &str = "network_unreachable";
    /// Peer refused the connection.
    pub const CONNECTION_REFUSED: &str = "connection_refused";
    /// Reply was malformed or did not match the request.
    pub const MALFORMED_REPLY: &str = "malformed_reply";
    /// Probe socket could not be opened (permissions, unsupported family).
    pub const SOCKET_UNAVAILABLE: &str = "socket_unavailable";
    /// Catch-all reported by the platform itself.
    pub const UNKNOWN: &str = "unknown";
}

/// Mapping table from platform failure codes to categories.
pub const FAILURE_CODES: &[(&str, ErrorCategory)] = &[
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

/// Reduce an I/O error kind to a platform failure code.
pub const fn io_failure_code(kind: io::ErrorKind) -> &'static str {
    match kind {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => codes::TIMEOUT,
        io::ErrorKind::NotFound => codes::HOST_NOT_FOUND,
        io::ErrorKind::InvalidInput => codes::HOST_NOT_SET,
        io::ErrorKind::HostUnreachable => codes::HOST_UNREACHABLE,
        io::ErrorKind::NetworkUnreachable | io::ErrorKind::NetworkDown => {
            codes::NETWORK_UNREACHABLE
        }
        io::ErrorKind::ConnectionRefused | io::ErrorKind::ConnectionReset => {
            codes::CONNECTION_REFUSED
        }
        io::ErrorKind::PermissionDenied | io::ErrorKind::AddrNotAvailable => {
            codes::SOCKET_UNAVAILABLE
        }
        io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => codes::MALFORMED_REPLY,
        _ => codes::UNKNOWN,
    }
}

/// Outcome of one probe attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProbeResult {
    /// Round trip completed.
    Success {
        /// Wall-clock round-trip time in milliseconds.
        latency_ms: f64,
    },
    /// Attempt failed.
    Failure {
        /// Classified cause.
        category: ErrorCategory,
    },
}

impl ProbeResult {
    /// Successful attempt with the given round-trip time.
    #[allow(clippy::cast_precision_loss)]
    pub fn success(rtt: Duration) -> Self {
        Self::Success {
            latency_ms: rtt.as_nanos() as f64 / 1_000_000.0,
        }
    }

    /// Successful attempt from a millisecond value; negative input clamps to zero.
    pub fn success_ms(latency_ms: f64) -> Self {
        Self::Success {
            latency_ms: latency_ms.max(0.0),
        }
    }

    /// Failed attempt.
    pub const fn failure(category: ErrorCategory) -> Self {
        Self::Failure { category }
    }

    /// Failed attempt classified from a raw platform code.
    pub fn from_failure_code(code: &str) -> Self {
        Self::failure(ErrorCategory::classify(code))
    }

    /// True for [`ProbeResult::Success`].
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Latency for successes.
    pub const fn latency_ms(&self) -> Option<f64> {
        match self {
            Self::Success { latency_ms } => Some(*latency_ms),
            Self::Failure { .. } => None,
        }
    }

    /// Category for failures.
    pub const fn category(&self) -> Option<ErrorCategory> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { category } => Some(*category),
        }
    }
}

/// A probe result with its position in the tick sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbeRecord {
    /// Tick sequence number within the run, starting at 0.
    pub tick: u64,
    /// Clock time the tick fired (ms).
    pub scheduled_at_ms: u128,
    /// Clock time the result was known (ms).
    pub completed_at_ms: u128,
    /// Outcome.
    pub result: ProbeResult,
}
