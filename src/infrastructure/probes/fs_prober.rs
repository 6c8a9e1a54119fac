use std::path::{Path, PathBuf};
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::entities::{ProbeResult, Target};
use crate::domain::ports::prober::{DirectoryProber, ProbeError};

/// Measures directory-listing latency with a blocking `read_dir` moved onto
/// the tokio blocking pool, so a hung filesystem stalls only its own target's
/// loop and never the runtime worker threads.
pub struct FsProber;

impl FsProber {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Walk the directory iterator to the end. `read_dir` alone opens the
    /// directory but does not read its entries, which is the operation whose
    /// latency we are measuring.
    fn list_dir(path: &Path) -> std::io::Result<usize> {
        let mut entries = 0usize;
        for entry in std::fs::read_dir(path)? {
            entry?;
            entries += 1;
        }
        Ok(entries)
    }
}

impl Default for FsProber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DirectoryProber for FsProber {
    async fn measure(&self, target: &Target) -> Result<ProbeResult, ProbeError> {
        let path = PathBuf::from(target.path());
        let timestamp = Utc::now();
        let started = Instant::now();
        let listing = tokio::task::spawn_blocking(move || Self::list_dir(&path)).await;
        let duration = started.elapsed();

        match listing {
            Ok(Ok(_entries)) => Ok(ProbeResult {
                target: target.clone(),
                duration,
                timestamp,
            }),
            Ok(Err(source)) => Err(ProbeError::ListingFailed {
                path: target.path().to_string(),
                source,
            }),
            Err(e) => Err(ProbeError::TaskFailed(e.to_string())),
        }
    }
}
