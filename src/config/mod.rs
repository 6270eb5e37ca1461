//! Configuration models for the probe scheduler.

pub mod probe;

pub use probe::ProbeConfig;
