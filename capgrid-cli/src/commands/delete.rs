//! Rm Command
//!
//! Unlinks a file or directory from its parent.

use crate::client::GridClient;
use crate::commands::format_bytes;
use crate::symbols;
use anyhow::{Context, Result};
use capgrid_client::GridObject;
use console::style;

/// Delete configuration
pub struct DeleteConfig {
    pub path: String,
    pub force: bool,
}

/// Run rm command
pub async fn run(client: &GridClient, config: DeleteConfig) -> Result<()> {
    let root = client.root().await?;

    // Check if the object exists first
    let object = match root.child(&config.path).await {
        Ok(object) => object,
        Err(e) if e.is_not_found() => {
            println!("{} Not found: {}", style("Error:").red(), config.path);
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to look up object"),
    };

    if !config.force {
        println!(
            "{} About to unlink: {}",
            style("Warning:").yellow(),
            config.path
        );
        match &object {
            GridObject::File(file) => match file.known_size() {
                Some(size) => println!("  File, {}", format_bytes(size)),
                None => println!("  Mutable file"),
            },
            GridObject::Directory(_) => println!("  Directory"),
        }
        println!("\nUse --force to delete without confirmation.");
        return Ok(());
    }

    root.delete(&config.path)
        .await
        .context("Failed to delete object")?;

    println!(
        "{} Deleted: {}",
        style(symbols::CHECK).green(),
        config.path
    );
    Ok(())
}
