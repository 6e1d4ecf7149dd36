//! Grid connection used by the commands
//!
//! Wraps the endpoint together with the configured root capability. The root
//! directory is opened lazily so commands that don't need it (mkroot) work
//! without one.

use anyhow::{Context, Result};
use capgrid_client::{ClientConfig, Directory, GridObject, ServerEndpoint};
use tracing::debug;

pub struct GridClient {
    endpoint: ServerEndpoint,
    root_cap: Option<String>,
}

impl GridClient {
    pub fn new(url: &str, root_cap: Option<String>, config: ClientConfig) -> Result<Self> {
        let endpoint = ServerEndpoint::with_config(url, config)
            .with_context(|| format!("Invalid grid URL: {}", url))?;
        Ok(Self { endpoint, root_cap })
    }

    pub fn endpoint(&self) -> &ServerEndpoint {
        &self.endpoint
    }

    /// Open the configured root directory
    pub async fn root(&self) -> Result<Directory> {
        let cap = self.root_cap.as_deref().context(
            "No root capability. Pass --cap, set CAPGRID_ROOT_CAP or run 'capgrid mkroot --save'",
        )?;
        debug!(url = %self.endpoint.url("/"), "Opening root directory");
        Directory::open(&self.endpoint, cap)
            .await
            .context("Failed to open root directory")
    }

    /// Resolve `path` below the root; an empty path, `/` or `.` is the root itself
    pub async fn resolve(&self, path: &str) -> Result<GridObject> {
        let root = self.root().await?;
        resolve_in(&root, path).await
    }
}

/// Resolve `path` below an already opened directory
pub async fn resolve_in(dir: &Directory, path: &str) -> Result<GridObject> {
    if capgrid_client::path::is_self(path) {
        return Ok(GridObject::Directory(dir.clone()));
    }
    dir.child(path)
        .await
        .with_context(|| format!("Failed to look up {}", path))
}
