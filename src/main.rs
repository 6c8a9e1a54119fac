use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use pathpulse::application::config::AppConfig;
use pathpulse::application::services::aggregator::AlertAggregator;
use pathpulse::application::services::poller::ProbeService;
use pathpulse::domain::ports::Notifier;
use pathpulse::infrastructure::notifications::{NullNotifier, SmtpNotifier};
use pathpulse::infrastructure::probes::FsProber;
use pathpulse::presentation::cli::app::{Cli, Commands};
use pathpulse::presentation::cli::commands::check::run_check;
use pathpulse::presentation::cli::commands::run::run_daemon;

fn print_banner() {
    println!("{}", "━".repeat(48).cyan());
    println!(
        "{}",
        "  PATHPULSE — Filesystem Responsiveness Monitor".bold().cyan()
    );
    println!("{}", "━".repeat(48).cyan());
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    // Load configuration; any validation failure aborts with a non-zero exit
    // before a single poll loop starts.
    let config = if let Some(ref path) = cli.config {
        AppConfig::load_from(path)?
    } else {
        AppConfig::load()?
    };
    config.validate()?;

    let targets = config.trimmed_targets();

    // Manual DI — main.rs is the only place that knows concrete types
    let prober = Arc::new(FsProber::new());

    match cli.command {
        Some(Commands::Check) => {
            run_check(prober.as_ref(), &targets, config.threshold()).await?;
        }
        Some(Commands::Run) | None => {
            print_banner();

            let notifier: Arc<dyn Notifier> = if config.email.enabled {
                Arc::new(SmtpNotifier::new(&config.email)?)
            } else {
                // Never reached: the aggregator checks the enabled flag first
                Arc::new(NullNotifier::new())
            };
            let aggregator = Arc::new(AlertAggregator::new(
                config.cooldown(),
                config.email.enabled,
                config.email.signature.clone(),
            ));
            let service = Arc::new(ProbeService::new(
                prober,
                Arc::clone(&aggregator),
                config.threshold(),
            ));

            run_daemon(
                service,
                aggregator,
                notifier,
                targets,
                config.poll_interval(),
            )
            .await?;
        }
    }

    Ok(())
}
