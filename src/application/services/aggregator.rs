use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::domain::entities::{AlertRecord, AlertReport};
use crate::domain::ports::Notifier;

/// Outcome of a single `maybe_flush` check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    /// Queue empty, channel disabled, or cooldown still running.
    Skipped,
    /// Send confirmed; the batch of this many records was removed.
    Sent(usize),
    /// Send attempted and failed; the queue is retained for the next window.
    Failed,
}

/// Accumulates slow-probe records and flushes them as one composite report,
/// debounced by a cooldown between successful sends.
///
/// The pending queue and the rate-limit timestamp are the only shared mutable
/// state in the process: producers are the per-target poll loops, the consumer
/// is the periodic flush task. With the channel disabled, records still
/// accumulate (and are logged at probe time) but nothing is ever sent, so the
/// queue grows without bound — intentional, see DESIGN.md.
pub struct AlertAggregator {
    queue: Mutex<Vec<AlertRecord>>,
    last_sent: Mutex<Option<Instant>>,
    cooldown: Duration,
    enabled: bool,
    signature: String,
}

impl AlertAggregator {
    #[must_use]
    pub fn new(cooldown: Duration, enabled: bool, signature: String) -> Self {
        Self {
            queue: Mutex::new(Vec::new()),
            last_sent: Mutex::new(None),
            cooldown,
            enabled,
            signature,
        }
    }

    /// Append a slow-probe record to the pending queue. Insertion order is
    /// preserved across concurrent producers.
    pub fn record(&self, record: AlertRecord) {
        // A poisoned lock still holds a valid queue; recover it rather than
        // drop the record.
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        queue.push(record);
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check the flush conditions and send the backlog if they all hold:
    /// queue non-empty, channel enabled, and either no send has succeeded yet
    /// or the cooldown has elapsed since the last one.
    ///
    /// On confirmed success the sent batch is removed and the rate-limit clock
    /// restarts. On failure the queue and the rate-limit state are untouched,
    /// so the next eligible window retries with the accumulated backlog.
    pub async fn maybe_flush(&self, notifier: &dyn Notifier) -> FlushOutcome {
        let batch = {
            let queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
            if queue.is_empty() || !self.enabled || !self.cooldown_elapsed() {
                return FlushOutcome::Skipped;
            }
            queue.clone()
        };

        let report = self.compose(&batch);
        info!(
            "flushing {} pending alert record(s): {}",
            batch.len(),
            report.subject
        );

        // The lock is not held across the await; records arriving mid-send
        // stay behind the sent batch and go out in the next window.
        match notifier.send(&report).await {
            Ok(()) => {
                let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
                queue.drain(..batch.len());
                *self
                    .last_sent
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner) = Some(Instant::now());
                info!("alert report sent ({} record(s))", batch.len());
                FlushOutcome::Sent(batch.len())
            }
            Err(e) => {
                warn!(
                    "alert send failed, keeping {} pending record(s): {e}",
                    batch.len()
                );
                FlushOutcome::Failed
            }
        }
    }

    fn cooldown_elapsed(&self) -> bool {
        self.last_sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .map_or(true, |at| at.elapsed() > self.cooldown)
    }

    fn compose(&self, batch: &[AlertRecord]) -> AlertReport {
        let subject = format!("pathpulse: {} slow probe(s)", batch.len());
        let mut body = batch
            .iter()
            .map(|r| r.formatted_message.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        if !self.signature.is_empty() {
            body.push_str("\n\n");
            body.push_str(&self.signature);
        }
        AlertReport { subject, body }
    }
}
