#![allow(clippy::expect_used)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use pathpulse::application::services::aggregator::{AlertAggregator, FlushOutcome};
use pathpulse::application::services::poller::ProbeService;
use pathpulse::domain::entities::{AlertReport, ProbeResult, Target};
use pathpulse::domain::ports::notifier::NotificationError;
use pathpulse::domain::ports::prober::{DirectoryProber, ProbeError};
use pathpulse::domain::ports::Notifier;

/// Prober scripted with a fixed duration per path.
struct MappedProber {
    durations: HashMap<String, Duration>,
}

impl MappedProber {
    fn new(entries: &[(&str, u64)]) -> Self {
        Self {
            durations: entries
                .iter()
                .map(|(path, millis)| ((*path).to_string(), Duration::from_millis(*millis)))
                .collect(),
        }
    }
}

#[async_trait]
impl DirectoryProber for MappedProber {
    async fn measure(&self, target: &Target) -> Result<ProbeResult, ProbeError> {
        let duration = self
            .durations
            .get(target.path())
            .copied()
            .ok_or_else(|| ProbeError::TaskFailed(format!("unscripted path {target}")))?;
        Ok(ProbeResult {
            target: target.clone(),
            duration,
            timestamp: Utc::now(),
        })
    }
}

struct RecordingNotifier {
    sent: Mutex<Vec<AlertReport>>,
}

impl RecordingNotifier {
    fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }

    fn reports(&self) -> Vec<AlertReport> {
        self.sent.lock().expect("lock").clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, report: &AlertReport) -> Result<(), NotificationError> {
        self.sent.lock().expect("lock").push(report.clone());
        Ok(())
    }
}

struct FailingNotifier {
    attempts: AtomicUsize,
}

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send(&self, _report: &AlertReport) -> Result<(), NotificationError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(NotificationError::SendFailed("relay down".into()))
    }
}

fn make_pipeline(enabled: bool) -> (ProbeService, Arc<AlertAggregator>) {
    let aggregator = Arc::new(AlertAggregator::new(
        Duration::from_secs(1800),
        enabled,
        String::new(),
    ));
    let prober = Arc::new(MappedProber::new(&[("/a", 100), ("/b", 400), ("/c", 900)]));
    let service = ProbeService::new(prober, Arc::clone(&aggregator), Duration::from_millis(250));
    (service, aggregator)
}

#[tokio::test]
async fn one_fast_one_slow_target_sends_immediately_with_no_prior_send() {
    let (service, aggregator) = make_pipeline(true);

    // threshold 0.25s: /a at 0.10s is normal, /b at 0.40s is slow
    service.probe_once(&Target::new("/a")).await;
    service.probe_once(&Target::new("/b")).await;
    assert_eq!(aggregator.pending_count(), 1);

    let notifier = RecordingNotifier::new();
    assert_eq!(aggregator.maybe_flush(&notifier).await, FlushOutcome::Sent(1));
    assert_eq!(aggregator.pending_count(), 0);

    let reports = notifier.reports();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].body.contains("/b"));
    assert!(!reports[0].body.contains("/a"));
}

#[tokio::test]
async fn slow_results_within_one_window_batch_into_a_single_send() {
    let (service, aggregator) = make_pipeline(true);

    service.probe_once(&Target::new("/b")).await;
    service.probe_once(&Target::new("/c")).await;
    service.probe_once(&Target::new("/b")).await;

    let notifier = RecordingNotifier::new();
    assert_eq!(aggregator.maybe_flush(&notifier).await, FlushOutcome::Sent(3));

    let reports = notifier.reports();
    assert_eq!(reports.len(), 1, "exactly one send for the whole window");
    assert_eq!(reports[0].subject, "pathpulse: 3 slow probe(s)");
    assert_eq!(reports[0].body.lines().count(), 3);
}

#[tokio::test]
async fn failed_send_keeps_backlog_for_the_next_window() {
    let (service, aggregator) = make_pipeline(true);

    service.probe_once(&Target::new("/b")).await;

    let failing = FailingNotifier {
        attempts: AtomicUsize::new(0),
    };
    assert_eq!(aggregator.maybe_flush(&failing).await, FlushOutcome::Failed);
    assert_eq!(aggregator.pending_count(), 1);
    assert_eq!(failing.attempts.load(Ordering::SeqCst), 1);

    // Another slow probe joins the backlog before the retry succeeds.
    service.probe_once(&Target::new("/c")).await;

    let notifier = RecordingNotifier::new();
    assert_eq!(aggregator.maybe_flush(&notifier).await, FlushOutcome::Sent(2));

    let reports = notifier.reports();
    let body = &reports[0].body;
    let pos_b = body.find("/b").expect("/b in body");
    let pos_c = body.find("/c").expect("/c in body");
    assert!(pos_b < pos_c, "arrival order preserved across the retry");
}

#[tokio::test]
async fn cooldown_blocks_a_second_send_within_the_window() {
    let (service, aggregator) = make_pipeline(true);
    let notifier = RecordingNotifier::new();

    service.probe_once(&Target::new("/b")).await;
    assert_eq!(aggregator.maybe_flush(&notifier).await, FlushOutcome::Sent(1));

    service.probe_once(&Target::new("/c")).await;
    assert_eq!(aggregator.maybe_flush(&notifier).await, FlushOutcome::Skipped);
    assert_eq!(aggregator.pending_count(), 1);
    assert_eq!(notifier.reports().len(), 1);
}

#[tokio::test]
async fn disabled_email_still_queues_slow_results_but_never_sends() {
    let (service, aggregator) = make_pipeline(false);
    let notifier = RecordingNotifier::new();

    for _ in 0..3 {
        service.probe_once(&Target::new("/b")).await;
        assert_eq!(aggregator.maybe_flush(&notifier).await, FlushOutcome::Skipped);
    }

    // Documented behavior: the queue grows without bound when disabled.
    assert_eq!(aggregator.pending_count(), 3);
    assert!(notifier.reports().is_empty());
}

#[tokio::test]
async fn unscripted_probe_failure_does_not_poison_the_pipeline() {
    let (service, aggregator) = make_pipeline(true);

    assert_eq!(service.probe_once(&Target::new("/missing")).await, None);
    service.probe_once(&Target::new("/b")).await;

    assert_eq!(aggregator.pending_count(), 1);
}
