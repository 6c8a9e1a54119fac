use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::{ProbeResult, Target};

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("failed to list {path}: {source}")]
    ListingFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("probe task failed: {0}")]
    TaskFailed(String),
}

#[async_trait]
pub trait DirectoryProber: Send + Sync {
    /// Measure the wall-clock duration of one directory listing against
    /// `target`.
    ///
    /// # Errors
    ///
    /// Returns `ProbeError` if the listing fails (missing path, permission
    /// denied) or the measurement task is interrupted.
    async fn measure(&self, target: &Target) -> Result<ProbeResult, ProbeError>;
}
