use async_trait::async_trait;
use tracing::debug;

use crate::domain::entities::AlertReport;
use crate::domain::ports::notifier::{NotificationError, Notifier};

/// No-op notifier used when the email channel is disabled.
///
/// The aggregator checks the enabled flag before flushing, so this is never
/// reached in normal operation; it exists so the daemon wiring does not need
/// an `Option` around the notifier.
pub struct NullNotifier;

impl NullNotifier {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for NullNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for NullNotifier {
    async fn send(&self, report: &AlertReport) -> Result<(), NotificationError> {
        debug!("null notifier dropping report: {}", report.subject);
        Ok(())
    }
}
