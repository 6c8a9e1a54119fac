use std::time::Duration;

use chrono::{DateTime, Utc};

use super::target::Target;

/// Result of a single latency measurement against one target.
///
/// Created once per probe tick and consumed immediately by the threshold
/// evaluator; never retained.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub target: Target,
    pub duration: Duration,
    pub timestamp: DateTime<Utc>,
}

impl ProbeResult {
    /// Probe duration in seconds, as logged and reported.
    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        self.duration.as_secs_f64()
    }
}
