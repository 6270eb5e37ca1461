//! ICMP echo executor.
//!
//! Resolves the target, sends a single echo request through `surge-ping`, and
//! reduces every failure to a platform code before classification.

use std::io;
use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use surge_ping::{Client, Config, PingIdentifier, PingSequence, SurgeError, ICMP};

use crate::core::result::io_failure_code;
use crate::core::{codes, ErrorCategory, ProbeExecutor, ProbeResult, Target};

/// Default echo payload size in bytes.
pub const DEFAULT_PAYLOAD_LEN: usize = 56;

/// Single-shot ICMP echo probe.
#[derive(Debug, Clone)]
pub struct IcmpExecutor {
    payload_len: usize,
}

impl IcmpExecutor {
    /// Executor with the default payload size.
    pub const fn new() -> Self {
        Self {
            payload_len: DEFAULT_PAYLOAD_LEN,
        }
    }

    /// Set the echo payload size.
    pub const fn with_payload_len(mut self, payload_len: usize) -> Self {
        self.payload_len = payload_len;
        self
    }

    async fn ping_once(&self, target: &Target, timeout: Duration) -> Result<Duration, &'static str> {
        let ip = resolve_host(target.as_str()).await.map_err(|e| {
            tracing::warn!(host = %target, error = %e, "Failed to resolve hostname");
            resolve_failure_code(&e)
        })?;

        let config = match ip {
            IpAddr::V4(_) => Config::default(),
            IpAddr::V6(_) => Config::builder().kind(ICMP::V6).build(),
        };
        let client = Client::new(&config).map_err(|e| {
            tracing::warn!(host = %target, error = %e, "Failed to create ICMP client");
            io_failure_code(e.kind())
        })?;

        let mut pinger = client.pinger(ip, PingIdentifier(rand::random())).await;
        pinger.timeout(timeout);
        let payload = vec![0u8; self.payload_len];
        let (_, rtt) = pinger
            .ping(PingSequence(0), &payload)
            .await
            .map_err(|e| surge_failure_code(&e))?;
        Ok(rtt)
    }
}

impl Default for IcmpExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProbeExecutor for IcmpExecutor {
    async fn probe(&self, target: &Target, timeout: Duration) -> ProbeResult {
        match tokio::time::timeout(timeout, self.ping_once(target, timeout)).await {
            Ok(Ok(rtt)) => {
                tracing::debug!(host = %target, rtt_ms = rtt.as_secs_f64() * 1000.0, "Ping probe successful");
                ProbeResult::success(rtt)
            }
            Ok(Err(code)) => {
                let category = ErrorCategory::classify(code);
                tracing::debug!(host = %target, code, ?category, "Ping probe failed");
                ProbeResult::failure(category)
            }
            Err(_) => {
                tracing::debug!(host = %target, timeout_ms = timeout.as_millis(), "Ping probe timed out");
                ProbeResult::failure(ErrorCategory::Timeout)
            }
        }
    }
}

/// Resolve hostname to IP address.
async fn resolve_host(host: &str) -> Result<IpAddr, io::Error> {
    let host = host.trim();
    if host.is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "host not set"));
    }

    // First, try to parse as an IP address directly
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(ip);
    }

    let addrs = tokio::net::lookup_host(format!("{host}:0")).await?;
    addrs
        .into_iter()
        .next()
        .map(|addr| addr.ip())
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no addresses found"))
}

/// Resolver errors are host-level lookup failures whatever their I/O kind.
fn resolve_failure_code(err: &io::Error) -> &'static str {
    match err.kind() {
        io::ErrorKind::InvalidInput => codes::HOST_NOT_SET,
        io::ErrorKind::NotFound => codes::HOST_NOT_FOUND,
        io::ErrorKind::TimedOut => codes::TIMEOUT,
        _ => codes::DNS_RESOLUTION_FAILED,
    }
}

fn surge_failure_code(err: &SurgeError) -> &'static str {
    match err {
        SurgeError::Timeout { .. } => codes::TIMEOUT,
        SurgeError::IOError(e) => io_failure_code(e.kind()),
        SurgeError::IdenticalRequests { .. } => codes::PREVIOUS_PROBE_RUNNING,
        SurgeError::NetworkError => codes::NETWORK_UNREACHABLE,
        _ => codes::UNKNOWN,
    }
}
