use std::time::Duration;

use colored::Colorize;

use crate::domain::entities::Target;
use crate::domain::ports::DirectoryProber;
use crate::domain::value_objects::Classification;

/// Probe every target once and print duration and classification, one line
/// per target. Failed probes are printed, not fatal — the sweep always covers
/// the full list.
pub async fn run_check(
    prober: &dyn DirectoryProber,
    targets: &[Target],
    threshold: Duration,
) -> anyhow::Result<()> {
    for target in targets {
        match prober.measure(target).await {
            Ok(result) => {
                let line = format!("{:.5} sec\t{target}", result.duration_secs());
                if Classification::classify(result.duration, threshold).is_slow() {
                    println!("{} {line}", "SLOW".red().bold());
                } else {
                    println!("{}   {line}", "ok".green());
                }
            }
            Err(e) => {
                println!("{} {target}: {e}", "FAIL".red().bold());
            }
        }
    }
    Ok(())
}
