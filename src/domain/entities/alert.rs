use std::time::Duration;

use chrono::{DateTime, Utc};

use super::probe::ProbeResult;
use super::target::Target;

/// Timestamp format used in alert lines. No colons, so the lines stay safe to
/// reuse in filenames.
pub const ALERT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// A slow probe retained in the pending queue until flushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRecord {
    pub target: Target,
    pub duration: Duration,
    pub timestamp: DateTime<Utc>,
    pub formatted_message: String,
}

impl AlertRecord {
    /// Build a record from a slow probe result, pre-formatting its report line
    /// as `<timestamp>\t<duration> sec\t<path>`.
    #[must_use]
    pub fn from_result(result: &ProbeResult) -> Self {
        let formatted_message = format!(
            "{}\t{:.5} sec\t{}",
            result.timestamp.format(ALERT_TIMESTAMP_FORMAT),
            result.duration_secs(),
            result.target,
        );
        Self {
            target: result.target.clone(),
            duration: result.duration,
            timestamp: result.timestamp,
            formatted_message,
        }
    }
}

/// Composite report assembled from the pending queue and handed to a notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertReport {
    pub subject: String,
    pub body: String,
}
