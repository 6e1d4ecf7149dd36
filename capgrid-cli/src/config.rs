//! Configuration management
//!
//! Config directory: ~/.capgrid/ (cross-platform)
//!
//! Config file format (~/.capgrid/config.toml):
//! ```toml
//! [grid]
//! url = "http://127.0.0.1:3456"
//! root_cap = "URI:DIR2:..."
//!
//! [timeouts]
//! request_secs = 300
//! check_secs = 21600
//! ```

use anyhow::{Context, Result};
use capgrid_client::endpoint::{DEFAULT_CHECK_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};
use capgrid_client::ClientConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Valid keys for `capgrid config set`
pub const KEYS: &[&str] = &[
    "grid.url",
    "grid.root_cap",
    "timeouts.request_secs",
    "timeouts.check_secs",
];

/// Structure of ~/.capgrid/config.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CapgridConfig {
    #[serde(default)]
    pub grid: GridConfig,

    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

/// Which grid to talk to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Web gateway URL of the grid node
    #[serde(default = "default_grid_url")]
    pub url: String,

    /// Capability of the directory used as `/`
    #[serde(default = "default_root_cap", skip_serializing_if = "Option::is_none")]
    pub root_cap: Option<String>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            url: default_grid_url(),
            root_cap: default_root_cap(),
        }
    }
}

fn default_grid_url() -> String {
    std::env::var("CAPGRID_URL").unwrap_or_else(|_| "http://127.0.0.1:3456".to_string())
}

fn default_root_cap() -> Option<String> {
    std::env::var("CAPGRID_ROOT_CAP").ok()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    #[serde(default = "default_request_secs")]
    pub request_secs: u64,

    /// Check and repair can run for hours on large objects
    #[serde(default = "default_check_secs")]
    pub check_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: default_request_secs(),
            check_secs: default_check_secs(),
        }
    }
}

fn default_request_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}

fn default_check_secs() -> u64 {
    DEFAULT_CHECK_TIMEOUT.as_secs()
}

impl CapgridConfig {
    /// Transport settings for the client library
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            request_timeout: Duration::from_secs(self.timeouts.request_secs),
            check_timeout: Duration::from_secs(self.timeouts.check_secs),
            ..ClientConfig::default()
        }
    }

    /// Set one value by its dotted key
    pub fn set(&mut self, key: &str, value: String) -> Result<()> {
        match key {
            "grid.url" => self.grid.url = value,
            "grid.root_cap" => self.grid.root_cap = Some(value),
            "timeouts.request_secs" => {
                self.timeouts.request_secs = value
                    .parse()
                    .with_context(|| format!("Invalid number of seconds: {}", value))?
            }
            "timeouts.check_secs" => {
                self.timeouts.check_secs = value
                    .parse()
                    .with_context(|| format!("Invalid number of seconds: {}", value))?
            }
            _ => anyhow::bail!(
                "Unknown config key: {}. Valid keys: {}",
                key,
                KEYS.join(", ")
            ),
        }
        Ok(())
    }
}

/// Get the config directory path (~/.capgrid/)
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let config_dir = home.join(".capgrid");

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)
            .context("Failed to create config directory ~/.capgrid/")?;
    }

    Ok(config_dir)
}

pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load configuration from ~/.capgrid/config.toml.
/// Falls back to defaults if the file doesn't exist or can't be read.
pub fn load_config() -> CapgridConfig {
    match config_file_path() {
        Ok(path) => load_config_from(&path),
        Err(_) => CapgridConfig::default(),
    }
}

pub fn load_config_from(path: &Path) -> CapgridConfig {
    if !path.exists() {
        return CapgridConfig::default();
    }
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: Failed to parse config file: {}", e);
                CapgridConfig::default()
            }
        },
        Err(e) => {
            eprintln!("Warning: Failed to read config file: {}", e);
            CapgridConfig::default()
        }
    }
}

pub fn save_config(config: &CapgridConfig) -> Result<()> {
    save_config_to(&config_file_path()?, config)
}

pub fn save_config_to(path: &Path, config: &CapgridConfig) -> Result<()> {
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(path, content).context("Failed to write config file")?;
    Ok(())
}
