use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use crate::application::services::aggregator::AlertAggregator;
use crate::domain::entities::{AlertRecord, Target};
use crate::domain::ports::DirectoryProber;
use crate::domain::value_objects::Classification;

/// Drives the measure → classify → record cycle for the targets.
///
/// Every probe result is logged regardless of classification; only slow
/// results reach the aggregator. The logging path and the alerting path are
/// independent decisions.
pub struct ProbeService {
    prober: Arc<dyn DirectoryProber>,
    aggregator: Arc<AlertAggregator>,
    threshold: Duration,
}

impl ProbeService {
    #[must_use]
    pub fn new(
        prober: Arc<dyn DirectoryProber>,
        aggregator: Arc<AlertAggregator>,
        threshold: Duration,
    ) -> Self {
        Self {
            prober,
            aggregator,
            threshold,
        }
    }

    /// Run one probe against `target`: measure, classify, log, and queue an
    /// alert record when the probe is slow. A failed probe is logged and
    /// swallowed so one bad path never silences monitoring for the others.
    ///
    /// Returns the classification, or `None` if the probe itself failed.
    pub async fn probe_once(&self, target: &Target) -> Option<Classification> {
        let result = match self.prober.measure(target).await {
            Ok(result) => result,
            Err(e) => {
                error!("probe failed for {target}: {e}");
                return None;
            }
        };

        let class = Classification::classify(result.duration, self.threshold);
        match class {
            Classification::Normal => {
                info!("{:.5} sec\t{target}", result.duration_secs());
            }
            Classification::Slow => {
                error!(
                    "{:.5} sec\t{target} (threshold {:.5} sec)",
                    result.duration_secs(),
                    self.threshold.as_secs_f64()
                );
                self.aggregator.record(AlertRecord::from_result(&result));
            }
        }
        Some(class)
    }

    /// Unbounded poll loop for one target: probe, then wait out the interval.
    ///
    /// Probes within a target are strictly sequential — a probe that outlasts
    /// the interval delays the next tick instead of overlapping it.
    pub async fn run_target_loop(&self, target: Target, interval: Duration) {
        info!("polling {target} every {}s", interval.as_secs());
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.probe_once(&target).await;
        }
    }
}
