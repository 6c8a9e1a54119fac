use std::time::Duration;

/// Outcome of comparing a probe duration against the configured threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Normal,
    Slow,
}

impl Classification {
    /// Classify a probe duration. `Slow` iff the duration strictly exceeds
    /// the threshold; a duration exactly equal to the threshold is `Normal`.
    #[must_use]
    pub fn classify(duration: Duration, threshold: Duration) -> Self {
        if duration > threshold {
            Self::Slow
        } else {
            Self::Normal
        }
    }

    #[must_use]
    pub const fn is_slow(self) -> bool {
        matches!(self, Self::Slow)
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Slow => write!(f, "slow"),
        }
    }
}
