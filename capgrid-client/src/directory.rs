//! Directory objects
//!
//! Directories are never cached: every lookup and listing goes back to the
//! server, since other clients may change them at any time. All paths are
//! slash-separated and relative to the directory's own capability.

use crate::capability::{AsCapability, CapSet, Capability};
use crate::endpoint::{api_error, is_gone, ServerEndpoint};
use crate::error::{GridError, Result};
use crate::file::File;
use crate::metadata::NodeEntry;
use crate::object::{GridNode, GridObject, Node, ObjectKind};
use crate::path;
use bytes::Bytes;
use futures::future::{BoxFuture, FutureExt};
use reqwest::{Method, StatusCode};
use tracing::{debug, instrument, warn};

/// A mutable container mapping names to files and directories
#[derive(Debug, Clone)]
pub struct Directory {
    node: Node,
}

impl Directory {
    pub(crate) fn from_node(node: Node) -> Self {
        Self { node }
    }

    /// Create a brand-new, empty directory on the grid.
    ///
    /// Only the write capability comes back, so the new handle is writeable
    /// but `is_readable()` is false until it is reopened through a listing
    /// that also reports the read-only capability.
    pub async fn create(endpoint: &ServerEndpoint) -> Result<Self> {
        let response = endpoint
            .send(endpoint.request(Method::POST, "/uri?t=mkdir"))
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let cap = Capability::from_response(&response.text().await?)?;
        debug!("Created root directory");
        Ok(Self::writeable(endpoint, cap))
    }

    /// Open an existing directory by capability.
    pub async fn open(endpoint: &ServerEndpoint, cap: &(impl AsCapability + ?Sized)) -> Result<Self> {
        let cap = cap.capability();
        GridObject::open(endpoint, cap)
            .await?
            .require_directory(cap)
    }

    fn writeable(endpoint: &ServerEndpoint, cap: Capability) -> Self {
        Self::from_node(Node::new(endpoint.clone(), CapSet::read_write(cap), true))
    }

    fn ensure_writeable(&self, path: &str) -> Result<()> {
        if self.is_writeable() {
            Ok(())
        } else {
            Err(GridError::ReadOnly(path.to_string()))
        }
    }

    /// Look up the object at `path`.
    pub async fn child(&self, path: &str) -> Result<GridObject> {
        GridObject::fetch(self.node.endpoint(), &self.node.path(path), path).await
    }

    /// Look up the directory at `path`; the empty path is this directory.
    pub async fn subdirectory(&self, path: &str) -> Result<Directory> {
        if path::is_self(path) {
            return Ok(self.clone());
        }
        self.child(path).await?.require_directory(path)
    }

    /// Whether anything is linked at `path`
    pub async fn exists(&self, path: &str) -> Result<bool> {
        match self.child(path).await {
            Ok(_) => Ok(true),
            Err(GridError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Link an existing object (or a bare capability) at `path`, replacing
    /// whatever was there.
    pub async fn attach(&self, path: &str, target: &(impl AsCapability + ?Sized)) -> Result<()> {
        self.ensure_writeable(path)?;
        if path::is_self(path) {
            return Err(GridError::InvalidArgument(
                "cannot attach an object in place of the directory itself".to_string(),
            ));
        }

        let endpoint = self.node.endpoint();
        let request = endpoint.put_text(
            &format!("{}?t=uri", self.node.path(path)),
            target.capability(),
        );
        let response = endpoint.send(request).await?;
        let status = response.status();

        if is_gone(status) {
            return Err(GridError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            return Err(api_error(response).await);
        }
        Ok(())
    }

    /// Upload `data` as a new file and link it at `path`.
    pub async fn put_file(
        &self,
        path: &str,
        data: impl Into<Bytes>,
        mutable: bool,
    ) -> Result<Capability> {
        self.ensure_writeable(path)?;
        let file = File::create(self.node.endpoint(), data, mutable).await?;
        self.attach(path, &file).await?;
        Ok(file.cap().clone())
    }

    /// Create a subdirectory at `path`. One trailing slash is ignored.
    pub async fn mkdir(&self, path: &str) -> Result<Directory> {
        self.ensure_writeable(path)?;
        let path = path.strip_suffix('/').unwrap_or(path);
        if path::is_self(path) {
            return Err(GridError::InvalidArgument(
                "mkdir needs a non-empty path".to_string(),
            ));
        }

        let endpoint = self.node.endpoint();
        let response = endpoint
            .send(endpoint.request(Method::POST, &format!("{}?t=mkdir", self.node.path(path))))
            .await?;
        let status = response.status();

        if status == StatusCode::BAD_REQUEST {
            return Err(GridError::AlreadyExists(path.to_string()));
        }
        if is_gone(status) {
            return Err(GridError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            return Err(api_error(response).await);
        }

        let cap = Capability::from_response(&response.text().await?)?;
        Ok(Self::writeable(endpoint, cap))
    }

    /// Fetch the children of the directory at `path` in server order.
    async fn children_at(&self, path: &str) -> Result<Vec<(String, GridObject)>> {
        let endpoint = self.node.endpoint();
        let response = endpoint
            .send(endpoint.request(Method::GET, &format!("{}?t=json", self.node.path(path))))
            .await?;

        let status = response.status();
        if is_gone(status) {
            return Err(GridError::NotFound(format!("{} (status {})", path, status.as_u16())));
        }
        if !status.is_success() {
            return Err(api_error(response).await);
        }

        let body = response.bytes().await?;
        let entry: NodeEntry = serde_json::from_slice(&body)?;
        if !entry.is_dirnode() {
            return Err(GridError::TypeMismatch {
                path: path.to_string(),
                expected: ObjectKind::Directory,
                found: ObjectKind::File,
            });
        }

        let Some(children) = entry.attrs().children.as_ref() else {
            return Ok(Vec::new());
        };
        children
            .iter()
            .map(|(name, child)| {
                GridObject::from_entry(endpoint, child).map(|object| (name.clone(), object))
            })
            .collect()
    }

    /// All children of this directory, in the order the server lists them
    pub async fn children(&self) -> Result<Vec<(String, GridObject)>> {
        self.children_at("").await
    }

    /// Call `visitor` with every child's name and object
    pub async fn each<F>(&self, mut visitor: F) -> Result<()>
    where
        F: FnMut(&str, GridObject),
    {
        for (name, object) in self.children().await? {
            visitor(&name, object);
        }
        Ok(())
    }

    pub async fn is_empty(&self) -> Result<bool> {
        Ok(self.children().await?.is_empty())
    }

    /// Names of the children of the directory at `path`; subdirectories
    /// carry a trailing slash.
    pub async fn list_directory(&self, path: &str) -> Result<Vec<String>> {
        Ok(self
            .children_at(path)
            .await?
            .into_iter()
            .map(|(name, object)| match object {
                GridObject::Directory(_) => format!("{}/", name),
                GridObject::File(_) => name,
            })
            .collect())
    }

    /// Every path below the parent of `prefix` whose child name starts with
    /// the last component of `prefix`, recursing fully into matching
    /// subdirectories.
    ///
    /// A missing parent (or one that is a file) yields an empty list. Any
    /// other failure, including a subdirectory vanishing mid-walk, is
    /// returned.
    #[instrument(skip(self))]
    pub async fn list_paths_starting_with(&self, prefix: &str) -> Result<Vec<String>> {
        self.collect_paths(prefix, true).await
    }

    /// `missing_ok` only holds for the parent of the original prefix.
    fn collect_paths<'a>(
        &'a self,
        prefix: &'a str,
        missing_ok: bool,
    ) -> BoxFuture<'a, Result<Vec<String>>> {
        async move {
            let (parent, filter) = path::split_prefix(prefix);
            let names = match self.list_directory(parent).await {
                Ok(names) => names,
                Err(GridError::NotFound(_)) | Err(GridError::TypeMismatch { .. })
                    if missing_ok =>
                {
                    return Ok(Vec::new())
                }
                Err(e) => return Err(e),
            };

            let mut paths = Vec::new();
            for name in names.into_iter().filter(|name| name.starts_with(filter)) {
                let full = format!("{}{}", parent, name);
                if name.ends_with('/') {
                    let nested = self.collect_paths(&full, false).await?;
                    paths.push(full);
                    paths.extend(nested);
                } else {
                    paths.push(full);
                }
            }
            Ok(paths)
        }
        .boxed()
    }

    /// Unlink the object at `path`.
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.ensure_writeable(path)?;
        if path::is_self(path) {
            return Err(GridError::InvalidArgument(
                "cannot delete the directory from itself".to_string(),
            ));
        }

        let endpoint = self.node.endpoint();
        let response = endpoint
            .send(endpoint.request(Method::DELETE, &self.node.path(path)))
            .await?;
        let status = response.status();

        if is_gone(status) {
            return Err(GridError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            return Err(api_error(response).await);
        }
        Ok(())
    }

    pub async fn get_file_size(&self, path: &str) -> Result<u64> {
        self.child(path).await?.require_file(path)?.size().await
    }

    pub async fn get_file(&self, path: &str) -> Result<Bytes> {
        self.child(path).await?.require_file(path)?.data().await
    }

    /// Absolute URL of the object at `path`. No request is made.
    pub fn file_url(&self, path: &str) -> String {
        self.node.endpoint().url(&self.node.path(path))
    }

    /// Move the object at `old` to `new`.
    ///
    /// The server has no rename: the object is linked at `new` and then
    /// unlinked from `old`. If the second step fails the object stays
    /// reachable under both paths.
    #[instrument(skip(self))]
    pub async fn rename(&self, old: &str, new: &str) -> Result<()> {
        if path::is_within(old, new) {
            return Err(GridError::InvalidArgument(format!(
                "cannot rename '{}' into its own subtree '{}'",
                old, new
            )));
        }
        self.ensure_writeable(old)?;

        let object = self.child(old).await?;
        self.attach(new, &object).await?;

        if let Err(e) = self.delete(old).await {
            warn!(error = %e, "Linked new path but failed to unlink the old one");
            return Err(e);
        }
        Ok(())
    }
}

impl GridNode for Directory {
    fn node(&self) -> &Node {
        &self.node
    }
}

impl AsCapability for Directory {
    fn capability(&self) -> &str {
        self.cap().as_str()
    }
}
