//! Mkdir Command

use crate::client::GridClient;
use crate::symbols;
use anyhow::{Context, Result};
use capgrid_client::GridNode;
use console::style;

pub struct MkdirConfig {
    pub path: String,
}

pub async fn run(client: &GridClient, config: MkdirConfig) -> Result<()> {
    let root = client.root().await?;
    let dir = match root.mkdir(&config.path).await {
        Ok(dir) => dir,
        Err(e) if e.is_already_exists() => {
            println!(
                "{} Already exists: {}",
                style(symbols::WARN).yellow(),
                config.path
            );
            return Ok(());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to create {}", config.path));
        }
    };

    println!(
        "{} Created directory {}",
        style(symbols::CHECK).green(),
        config.path
    );
    println!("  Capability: {}", dir.cap());
    Ok(())
}
