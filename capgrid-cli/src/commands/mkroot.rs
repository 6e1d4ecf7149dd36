//! Mkroot Command
//!
//! Creates a fresh root directory on the grid.

use crate::client::GridClient;
use crate::symbols;
use anyhow::{Context, Result};
use capgrid_client::{Directory, GridNode};
use console::style;

pub struct MkrootConfig {
    /// Store the new capability as grid.root_cap
    pub save: bool,
}

pub async fn run(client: &GridClient, config: MkrootConfig) -> Result<()> {
    let root = Directory::create(client.endpoint())
        .await
        .context("Failed to create root directory")?;

    println!(
        "{} Created root directory",
        style(symbols::CHECK).green()
    );
    println!("{}", root.cap());

    if config.save {
        let mut cfg = crate::config::load_config();
        cfg.grid.root_cap = Some(root.cap().to_string());
        crate::config::save_config(&cfg)?;
        println!(
            "{} Saved as grid.root_cap",
            style(symbols::CHECK).green()
        );
    } else {
        println!(
            "{}",
            style("Keep this capability: it is the only way back to the directory").yellow()
        );
    }

    Ok(())
}
