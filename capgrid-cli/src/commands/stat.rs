//! Stat Command
//!
//! Shows the capabilities and attributes of one object.

use crate::client::{resolve_in, GridClient};
use crate::commands::{format_bytes, list::access};
use anyhow::{Context, Result};
use capgrid_client::{GridNode, GridObject};
use console::style;

pub struct StatConfig {
    pub path: String,
    /// Probe the size of mutable files with an extra request
    pub probe_size: bool,
}

pub async fn run(client: &GridClient, config: StatConfig) -> Result<()> {
    let root = client.root().await?;
    let object = resolve_in(&root, &config.path).await?;
    let caps = object.caps();

    println!("{}", style(&config.path).bold());
    println!("  Kind:        {}", style(object.kind()).cyan());
    println!("  Access:      {}", access(&object));
    println!(
        "  Mutable:     {}",
        if object.is_mutable() { "yes" } else { "no" }
    );

    if let GridObject::File(file) = &object {
        let size = match file.known_size() {
            Some(size) => format_bytes(size),
            None if config.probe_size => {
                format_bytes(file.size().await.context("Failed to probe file size")?)
            }
            None => "unknown (use --size to probe)".to_string(),
        };
        println!("  Size:        {}", size);
    }

    println!();
    if let Some(rw) = caps.rw() {
        println!("  {} {}", style("Write cap: ").dim(), rw);
    }
    if let Some(ro) = caps.ro() {
        println!("  {} {}", style("Read cap:  ").dim(), ro);
    }
    if let Some(repair) = caps.repair() {
        println!("  {} {}", style("Verify cap:").dim(), repair);
    }
    if object.is_file() {
        println!("  {} {}", style("URL:       ").dim(), root.file_url(&config.path));
    }

    Ok(())
}
