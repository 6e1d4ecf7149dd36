//! Get Command
//!
//! Downloads a file from the grid to a local file or stdout.

use crate::client::GridClient;
use crate::commands::{format_bytes, spinner};
use crate::symbols;
use anyhow::{Context, Result};
use console::style;
use std::io::Write;
use std::path::PathBuf;
use tokio::fs;

/// Download configuration
pub struct DownloadConfig {
    pub path: String,
    /// Local destination; stdout when absent
    pub output: Option<PathBuf>,
}

/// Run get command
pub async fn run(client: &GridClient, config: DownloadConfig) -> Result<()> {
    let root = client.root().await?;

    let pb = spinner(format!("Downloading {}", config.path))?;

    let data = match root.get_file(&config.path).await {
        Ok(data) => data,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e).with_context(|| format!("Failed to download {}", config.path));
        }
    };
    pb.finish_and_clear();

    match &config.output {
        Some(output) => {
            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).await?;
                }
            }
            fs::write(output, &data)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            eprintln!(
                "{} Downloaded {} ({})\n  Saved to: {}",
                style(symbols::CHECK).green(),
                config.path,
                format_bytes(data.len() as u64),
                output.display()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&data)?;
            stdout.flush()?;
        }
    }

    Ok(())
}
