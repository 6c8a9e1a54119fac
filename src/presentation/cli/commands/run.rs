use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tracing::{error, info};

use crate::application::services::aggregator::AlertAggregator;
use crate::application::services::poller::ProbeService;
use crate::domain::entities::Target;
use crate::domain::ports::Notifier;

/// Run the monitoring daemon until a SIGINT signal (Ctrl+C) arrives via
/// [`tokio::signal::ctrl_c()`], then shut down gracefully and return `Ok(())`.
///
/// One worker task is spawned per target plus one periodic flush task, all
/// supervised here: a worker that panics or exits is logged with context and
/// the remaining workers keep running. Note: SIGTERM is **not** handled — if
/// systemd or container orchestration requires SIGTERM support, add a handler
/// via `tokio::signal::unix::signal(SignalKind::terminate())`.
///
/// # Errors
///
/// Currently always returns `Ok(())`; the signature leaves room for fatal
/// daemon errors.
pub async fn run_daemon(
    service: Arc<ProbeService>,
    aggregator: Arc<AlertAggregator>,
    notifier: Arc<dyn Notifier>,
    targets: Vec<Target>,
    interval: Duration,
) -> anyhow::Result<()> {
    info!(
        "daemon started: {} target(s), interval {}s",
        targets.len(),
        interval.as_secs()
    );

    let mut workers = JoinSet::new();
    for target in targets {
        let service = Arc::clone(&service);
        workers.spawn(async move { service.run_target_loop(target, interval).await });
    }
    {
        let aggregator = Arc::clone(&aggregator);
        let notifier = Arc::clone(&notifier);
        workers.spawn(async move { flush_loop(&aggregator, notifier.as_ref(), interval).await });
    }

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            joined = workers.join_next() => {
                // Worker loops never return on their own; reaching here means
                // a panic or an abort. Log it and keep the others running.
                match joined {
                    Some(Err(e)) => error!("worker task aborted: {e}"),
                    Some(Ok(())) => error!("worker task exited unexpectedly"),
                    None => {
                        error!("all worker tasks stopped, shutting down");
                        break;
                    }
                }
            }
            _ = &mut shutdown => {
                info!("shutdown signal received, stopping workers");
                workers.shutdown().await;
                break;
            }
        }
    }
    Ok(())
}

/// Periodic flush check, at the same cadence as the poll loops.
async fn flush_loop(aggregator: &AlertAggregator, notifier: &dyn Notifier, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        ticker.tick().await;
        aggregator.maybe_flush(notifier).await;
    }
}
