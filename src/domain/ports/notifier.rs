use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::AlertReport;

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("failed to send notification: {0}")]
    SendFailed(String),
    #[error("notification channel unavailable: {0}")]
    ChannelUnavailable(String),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver an aggregated alert report through the channel.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError` if the report fails to send or the
    /// channel is unavailable. Implementations must bound the wait with a
    /// hard timeout; a hung transport surfaces as an error, never a stall.
    async fn send(&self, report: &AlertReport) -> Result<(), NotificationError>;
}
