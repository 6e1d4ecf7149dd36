//! List Commands
//!
//! `ls` lists one directory, `find` lists every path below a prefix.

use crate::client::GridClient;
use crate::commands::format_bytes;
use crate::symbols;
use anyhow::{Context, Result};
use capgrid_client::{GridNode, GridObject};
use console::style;

/// List configuration
pub struct ListConfig {
    pub path: String,
    pub long_format: bool,
}

/// Run ls command
pub async fn run(client: &GridClient, config: ListConfig) -> Result<()> {
    if !config.long_format {
        let root = client.root().await?;
        let names = root
            .list_directory(&config.path)
            .await
            .with_context(|| format!("Failed to list {}", config.path))?;
        if names.is_empty() {
            println!("{} Directory is empty", style("Info:").cyan());
        }
        for name in names {
            println!("{}", name);
        }
        return Ok(());
    }

    let dir = client
        .root()
        .await?
        .subdirectory(&config.path)
        .await
        .with_context(|| format!("Failed to open {}", config.path))?;
    let children = dir.children().await.context("Failed to list directory")?;

    println!(
        "{:<4} {:<4} {:>12}  {}",
        style("TYPE").bold(),
        style("CAP").bold(),
        style("SIZE").bold(),
        style("NAME").bold()
    );
    println!("{}", symbols::HLINE.repeat(60));

    let mut total_size: u64 = 0;
    for (name, object) in &children {
        let (kind, size, name) = match object {
            GridObject::Directory(_) => ("dir", "-".to_string(), format!("{}/", name)),
            GridObject::File(file) => {
                let size = match file.known_size() {
                    Some(size) => {
                        total_size += size;
                        format_bytes(size)
                    }
                    None => "?".to_string(),
                };
                ("file", size, name.clone())
            }
        };
        println!(
            "{:<4} {:<4} {:>12}  {}",
            kind,
            access(object),
            size,
            name
        );
    }

    println!("{}", symbols::HLINE.repeat(60));
    println!(
        "{} entries, {} in files of known size",
        style(children.len()).green(),
        format_bytes(total_size)
    );

    Ok(())
}

/// Find configuration
pub struct FindConfig {
    pub prefix: String,
}

/// Run find command
pub async fn find(client: &GridClient, config: FindConfig) -> Result<()> {
    let root = client.root().await?;
    let mut paths = root
        .list_paths_starting_with(&config.prefix)
        .await
        .context("Failed to search directory tree")?;

    if paths.is_empty() {
        println!(
            "{} No paths start with '{}'",
            style("Info:").cyan(),
            config.prefix
        );
        return Ok(());
    }

    paths.sort();
    for path in paths {
        println!("{}", path);
    }
    Ok(())
}

/// Short access label: rw, ro, or `vfy` for verify-only caps
pub fn access(object: &impl GridNode) -> &'static str {
    if object.is_writeable() {
        "rw"
    } else if object.is_readable() {
        "ro"
    } else {
        "vfy"
    }
}
