//! Mv Command

use crate::client::GridClient;
use crate::symbols;
use anyhow::{Context, Result};
use console::style;

pub struct RenameConfig {
    pub old: String,
    pub new: String,
}

pub async fn run(client: &GridClient, config: RenameConfig) -> Result<()> {
    let root = client.root().await?;
    root.rename(&config.old, &config.new)
        .await
        .with_context(|| format!("Failed to move {} to {}", config.old, config.new))?;

    println!(
        "{} Moved {} {} {}",
        style(symbols::CHECK).green(),
        config.old,
        style("->").dim(),
        config.new
    );
    Ok(())
}
