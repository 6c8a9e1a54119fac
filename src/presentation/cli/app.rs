use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// pathpulse — filesystem responsiveness monitor
///
/// Probes a set of directories for listing latency on a fixed interval and
/// raises a rate-limited email alert when a probe exceeds the threshold.
#[derive(Parser, Debug)]
#[command(name = "pathpulse")]
#[command(version, about, long_about)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to custom config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the monitoring daemon (default)
    #[command(alias = "r")]
    Run,

    /// Probe every target once and print the results
    #[command(alias = "c")]
    Check,
}
