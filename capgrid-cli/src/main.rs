//! capgrid CLI
//!
//! Command-line client for a capability-addressed storage grid.
//!
//! # Commands
//! - `mkroot` - Create a new root directory
//! - `ls` - List a directory
//! - `find` - List every path below a prefix
//! - `get` - Download a file
//! - `put` - Upload a file
//! - `mkdir` - Create a directory
//! - `rm` - Unlink a file or directory
//! - `mv` - Move a file or directory
//! - `stat` - Show capabilities and attributes
//! - `check` / `repair` - Server-side integrity check and repair
//! - `config` - Show or edit configuration
//!
//! # Configuration
//! Config file: ~/.capgrid/config.toml

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod client;
mod commands;
mod config;
mod symbols;

use client::GridClient;
use commands::{check, delete, download, list, mkdir, mkroot, rename, stat, upload};

#[derive(Parser)]
#[command(name = "capgrid")]
#[command(about = "Capability-addressed storage grid CLI")]
#[command(version)]
struct Cli {
    /// Grid web gateway URL (overrides config file)
    #[arg(long, global = true, env = "CAPGRID_URL")]
    url: Option<String>,

    /// Root directory capability (overrides config file)
    #[arg(long, global = true, env = "CAPGRID_ROOT_CAP", hide_env_values = true)]
    cap: Option<String>,

    /// Log requests (-v) or everything (-vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new, empty root directory and print its capability
    Mkroot {
        /// Store the capability in the config file
        #[arg(long)]
        save: bool,
    },

    /// List a directory
    Ls {
        #[arg(default_value = "/")]
        path: String,

        /// Show type, access and size
        #[arg(short, long)]
        long: bool,
    },

    /// List every path starting with a prefix
    Find {
        #[arg(default_value = "/")]
        prefix: String,
    },

    /// Download a file
    Get {
        path: String,

        /// Output file (stdout if not given)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Upload a local file
    Put {
        local: PathBuf,
        path: String,

        /// Upload as a mutable file
        #[arg(short, long)]
        mutable: bool,
    },

    /// Create a directory
    Mkdir { path: String },

    /// Unlink a file or directory
    Rm {
        path: String,

        /// Delete without confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Move a file or directory
    Mv { old: String, new: String },

    /// Show capabilities and attributes
    Stat {
        #[arg(default_value = "/")]
        path: String,

        /// Probe the size of mutable files
        #[arg(short, long)]
        size: bool,
    },

    /// Run a server-side integrity check
    Check {
        #[arg(default_value = "/")]
        path: String,

        /// Download and verify every share
        #[arg(long)]
        verify: bool,

        /// Renew the storage lease of every share
        #[arg(long)]
        add_lease: bool,

        /// Print the full check results
        #[arg(short, long)]
        full: bool,
    },

    /// Check and repair if needed
    Repair {
        #[arg(default_value = "/")]
        path: String,

        #[arg(long)]
        verify: bool,

        #[arg(long)]
        add_lease: bool,
    },

    /// Show or initialize configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Show config file path
    Path,

    /// Initialize config file with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., grid.url, grid.root_cap)
        key: String,
        /// Value to set
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    // Config commands never talk to the grid
    let command = match cli.command {
        Commands::Config { command } => return handle_config_command(command),
        command => command,
    };

    // Load configuration from ~/.capgrid/config.toml
    let cfg = config::load_config();

    // CLI args override config file
    let url = cli.url.unwrap_or_else(|| cfg.grid.url.clone());
    let root_cap = cli.cap.or_else(|| cfg.grid.root_cap.clone());

    let client = GridClient::new(&url, root_cap, cfg.client_config())?;

    match command {
        Commands::Mkroot { save } => {
            mkroot::run(&client, mkroot::MkrootConfig { save }).await?;
        }

        Commands::Ls { path, long } => {
            let config = list::ListConfig {
                path,
                long_format: long,
            };
            list::run(&client, config).await?;
        }

        Commands::Find { prefix } => {
            list::find(&client, list::FindConfig { prefix }).await?;
        }

        Commands::Get { path, output } => {
            download::run(&client, download::DownloadConfig { path, output }).await?;
        }

        Commands::Put {
            local,
            path,
            mutable,
        } => {
            let config = upload::UploadConfig {
                local,
                path,
                mutable,
            };
            upload::run(&client, config).await?;
        }

        Commands::Mkdir { path } => {
            mkdir::run(&client, mkdir::MkdirConfig { path }).await?;
        }

        Commands::Rm { path, force } => {
            delete::run(&client, delete::DeleteConfig { path, force }).await?;
        }

        Commands::Mv { old, new } => {
            rename::run(&client, rename::RenameConfig { old, new }).await?;
        }

        Commands::Stat { path, size } => {
            let config = stat::StatConfig {
                path,
                probe_size: size,
            };
            stat::run(&client, config).await?;
        }

        Commands::Check {
            path,
            verify,
            add_lease,
            full,
        } => {
            let config = check::CheckConfig {
                path,
                verify,
                add_lease,
                verbose: full,
            };
            check::run(&client, config).await?;
        }

        Commands::Repair {
            path,
            verify,
            add_lease,
        } => {
            let config = check::CheckConfig {
                path,
                verify,
                add_lease,
                verbose: false,
            };
            check::repair(&client, config).await?;
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}

/// Handle config subcommands
fn handle_config_command(command: Option<ConfigCommands>) -> Result<()> {
    use console::style;

    match command {
        None | Some(ConfigCommands::Show) => {
            let cfg = config::load_config();
            println!();
            println!("{}", style("capgrid Configuration").bold().underlined());
            println!();
            println!("{}", style("[grid]").cyan());
            println!("  url = \"{}\"", cfg.grid.url);
            match &cfg.grid.root_cap {
                Some(cap) => println!("  root_cap = \"{}\"", cap),
                None => println!("  root_cap = {}", style("(not set)").dim()),
            }
            println!();
            println!("{}", style("[timeouts]").cyan());
            println!("  request_secs = {}", cfg.timeouts.request_secs);
            println!("  check_secs = {}", cfg.timeouts.check_secs);
            println!();

            if let Ok(path) = config::config_file_path() {
                println!("{} {}", style("Config file:").dim(), path.display());
                if !path.exists() {
                    println!(
                        "{} Run '{}' to create it",
                        style("(not created yet)").yellow(),
                        style("capgrid config init").green()
                    );
                }
            }
        }

        Some(ConfigCommands::Path) => {
            println!("{}", config::config_file_path()?.display());
        }

        Some(ConfigCommands::Init { force }) => {
            let path = config::config_file_path()?;
            if path.exists() && !force {
                println!(
                    "{} Config file already exists at {}",
                    style(symbols::WARN).yellow(),
                    path.display()
                );
                println!("Use --force to overwrite");
                return Ok(());
            }

            config::save_config(&config::CapgridConfig::default())?;
            println!(
                "{} Config file created at {}",
                style(symbols::CHECK).green(),
                path.display()
            );
        }

        Some(ConfigCommands::Set { key, value }) => {
            let mut cfg = config::load_config();
            cfg.set(&key, value)?;
            config::save_config(&cfg)?;
            println!("{} Configuration updated", style(symbols::CHECK).green());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_put() {
        let cli = Cli::try_parse_from(["capgrid", "put", "notes.txt", "/docs/notes.txt", "--mutable"])
            .unwrap();
        match cli.command {
            Commands::Put {
                local,
                path,
                mutable,
            } => {
                assert_eq!(local, PathBuf::from("notes.txt"));
                assert_eq!(path, "/docs/notes.txt");
                assert!(mutable);
            }
            _ => panic!("expected put"),
        }
    }

    #[test]
    fn test_ls_defaults_to_root() {
        let cli = Cli::try_parse_from(["capgrid", "ls", "-l"]).unwrap();
        match cli.command {
            Commands::Ls { path, long } => {
                assert_eq!(path, "/");
                assert!(long);
            }
            _ => panic!("expected ls"),
        }
    }
}
