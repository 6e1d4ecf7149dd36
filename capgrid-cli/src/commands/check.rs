//! Check and Repair Commands
//!
//! Both run on the server and can take a long time on large objects.

use crate::client::GridClient;
use crate::commands::spinner;
use crate::symbols;
use anyhow::{Context, Result};
use capgrid_client::{CheckOptions, RepairOutcome};
use console::style;

/// Check configuration
pub struct CheckConfig {
    pub path: String,
    pub verify: bool,
    pub add_lease: bool,
    /// Print the full results object
    pub verbose: bool,
}

impl CheckConfig {
    fn options(&self) -> CheckOptions {
        CheckOptions::default()
            .verify(self.verify)
            .add_lease(self.add_lease)
    }
}

/// Run check command
pub async fn run(client: &GridClient, config: CheckConfig) -> Result<()> {
    let object = client.resolve(&config.path).await?;

    let pb = spinner(format!("Checking {}", config.path))?;
    let results = object.check(config.options()).await;
    pb.finish_and_clear();
    let results = results.context("Check failed")?;

    match results.get("healthy").and_then(|v| v.as_bool()) {
        Some(true) => println!("{} {} is healthy", style(symbols::CHECK).green(), config.path),
        Some(false) => println!(
            "{} {} is not healthy",
            style(symbols::CROSS).red(),
            config.path
        ),
        None => println!(
            "{} Server did not report health for {}",
            style(symbols::WARN).yellow(),
            config.path
        ),
    }

    if let Some(summary) = results.get("summary").and_then(|v| v.as_str()) {
        println!("  {}", summary);
    }
    if config.verbose {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    Ok(())
}

/// Run repair command
pub async fn repair(client: &GridClient, config: CheckConfig) -> Result<()> {
    let object = client.resolve(&config.path).await?;

    let pb = spinner(format!("Repairing {}", config.path))?;
    let outcome = object.repair(config.options()).await;
    pb.finish_and_clear();

    match outcome.context("Repair failed")? {
        RepairOutcome::NotAttempted => println!(
            "{} {} needed no repair",
            style(symbols::CHECK).green(),
            config.path
        ),
        RepairOutcome::Succeeded => println!(
            "{} {} repaired",
            style(symbols::CHECK).green(),
            config.path
        ),
        RepairOutcome::Failed => {
            println!(
                "{} Repair of {} failed",
                style(symbols::CROSS).red(),
                config.path
            );
            anyhow::bail!("Repair of {} failed", config.path);
        }
    }

    Ok(())
}
