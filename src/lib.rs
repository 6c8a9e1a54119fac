//! pathpulse — filesystem responsiveness monitor.
//!
//! Periodically probes a set of directories for listing latency and raises a
//! rate-limited email alert when a probe exceeds the configured threshold.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
