//! Put Command
//!
//! Uploads a local file and links it into the directory tree.

use crate::client::GridClient;
use crate::commands::{format_bytes, spinner};
use crate::symbols;
use anyhow::{Context, Result};
use console::style;
use std::path::PathBuf;
use tokio::fs;

/// Upload configuration
pub struct UploadConfig {
    pub local: PathBuf,
    pub path: String,
    /// Upload as a mutable file that can be overwritten in place
    pub mutable: bool,
}

/// Run put command
pub async fn run(client: &GridClient, config: UploadConfig) -> Result<()> {
    if !config.local.is_file() {
        anyhow::bail!("Not a file: {}", config.local.display());
    }

    let data = fs::read(&config.local)
        .await
        .with_context(|| format!("Failed to read {}", config.local.display()))?;
    let size = data.len() as u64;
    let root = client.root().await?;

    let pb = spinner(format!("Uploading {} ({})", config.path, format_bytes(size)))?;

    let result = root.put_file(&config.path, data, config.mutable).await;
    pb.finish_and_clear();
    let cap = result.with_context(|| format!("Failed to upload {}", config.path))?;

    println!(
        "{} Uploaded {} ({}{})",
        style(symbols::CHECK).green(),
        config.path,
        format_bytes(size),
        if config.mutable { ", mutable" } else { "" }
    );
    println!("  Capability: {}", cap);

    Ok(())
}
