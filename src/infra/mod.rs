//! Platform adapters: the ICMP probe primitive and traffic counters.

#[cfg(feature = "icmp")]
pub mod icmp;
pub mod traffic;

#[cfg(feature = "icmp")]
pub use icmp::IcmpExecutor;
pub use traffic::{SystemNetworks, TrafficCounters, TrafficMeter, TrafficSource, TrafficStats};
