//! Grid objects
//!
//! A grid object is either a [`File`] or a [`Directory`]. Both share a
//! [`Node`]: the endpoint, the capability slots and the mutability flag. The
//! variant is chosen once, from the type tag in the server's metadata, by
//! [`GridObject::from_entry`].

use crate::capability::{AsCapability, CapSet, Capability};
use crate::directory::Directory;
use crate::endpoint::ServerEndpoint;
use crate::error::{GridError, Result};
use crate::file::File;
use crate::metadata::NodeEntry;
use crate::path;
use reqwest::{Method, StatusCode};
use std::fmt;

/// Which variant an object is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    File,
    Directory,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::File => f.write_str("file"),
            ObjectKind::Directory => f.write_str("directory"),
        }
    }
}

/// State common to files and directories
#[derive(Debug, Clone)]
pub struct Node {
    endpoint: ServerEndpoint,
    caps: CapSet,
    mutable: bool,
}

impl Node {
    pub(crate) fn new(endpoint: ServerEndpoint, caps: CapSet, mutable: bool) -> Self {
        Self {
            endpoint,
            caps,
            mutable,
        }
    }

    pub fn endpoint(&self) -> &ServerEndpoint {
        &self.endpoint
    }

    pub fn caps(&self) -> &CapSet {
        &self.caps
    }

    /// Capability used for every request to this object
    pub fn cap(&self) -> &Capability {
        self.caps.effective()
    }

    pub fn is_readable(&self) -> bool {
        self.caps.is_readable()
    }

    pub fn is_writeable(&self) -> bool {
        self.caps.is_writeable()
    }

    /// Directories and mutable files
    pub fn is_mutable(&self) -> bool {
        self.mutable
    }

    pub fn is_immutable(&self) -> bool {
        !self.mutable
    }

    /// Request path for `path` below this object's capability
    pub(crate) fn path(&self, path: &str) -> String {
        path::object_path(self.cap().as_str(), path)
    }
}

/// Access to the shared [`Node`] of any grid object
pub trait GridNode {
    fn node(&self) -> &Node;

    fn cap(&self) -> &Capability {
        self.node().cap()
    }

    fn caps(&self) -> &CapSet {
        self.node().caps()
    }

    fn is_readable(&self) -> bool {
        self.node().is_readable()
    }

    fn is_writeable(&self) -> bool {
        self.node().is_writeable()
    }

    fn is_mutable(&self) -> bool {
        self.node().is_mutable()
    }

    fn is_immutable(&self) -> bool {
        self.node().is_immutable()
    }
}

/// A file or a directory
#[derive(Debug, Clone)]
pub enum GridObject {
    File(File),
    Directory(Directory),
}

impl GridObject {
    /// Resolve a capability into a file or directory by fetching its metadata.
    pub async fn open(endpoint: &ServerEndpoint, cap: &(impl AsCapability + ?Sized)) -> Result<Self> {
        let cap = cap.capability();
        Self::fetch(endpoint, &path::object_path(cap, ""), cap).await
    }

    /// `GET <path>?t=json` and build the object it describes.
    ///
    /// Any status other than 200 means the object is not there.
    pub(crate) async fn fetch(endpoint: &ServerEndpoint, object_path: &str, label: &str) -> Result<Self> {
        let response = endpoint
            .send(endpoint.request(Method::GET, &format!("{}?t=json", object_path)))
            .await?;

        if response.status() != StatusCode::OK {
            return Err(GridError::NotFound(format!(
                "{} (status {})",
                label,
                response.status().as_u16()
            )));
        }

        let body = response.bytes().await?;
        let entry: NodeEntry = serde_json::from_slice(&body)?;
        Self::from_entry(endpoint, &entry)
    }

    /// Build the variant named by the entry's type tag: `dirnode` is a
    /// directory, anything else a file.
    pub fn from_entry(endpoint: &ServerEndpoint, entry: &NodeEntry) -> Result<Self> {
        let attrs = entry.attrs();
        let node = Node::new(endpoint.clone(), attrs.caps()?, attrs.mutable);
        Ok(if entry.is_dirnode() {
            GridObject::Directory(Directory::from_node(node))
        } else {
            GridObject::File(File::from_node(node, attrs.known_size()))
        })
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            GridObject::File(_) => ObjectKind::File,
            GridObject::Directory(_) => ObjectKind::Directory,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, GridObject::File(_))
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, GridObject::Directory(_))
    }

    pub fn as_file(&self) -> Option<&File> {
        match self {
            GridObject::File(file) => Some(file),
            GridObject::Directory(_) => None,
        }
    }

    pub fn as_directory(&self) -> Option<&Directory> {
        match self {
            GridObject::Directory(dir) => Some(dir),
            GridObject::File(_) => None,
        }
    }

    pub fn into_file(self) -> Option<File> {
        match self {
            GridObject::File(file) => Some(file),
            GridObject::Directory(_) => None,
        }
    }

    pub fn into_directory(self) -> Option<Directory> {
        match self {
            GridObject::Directory(dir) => Some(dir),
            GridObject::File(_) => None,
        }
    }

    pub(crate) fn require_file(self, path: &str) -> Result<File> {
        match self {
            GridObject::File(file) => Ok(file),
            GridObject::Directory(_) => Err(GridError::TypeMismatch {
                path: path.to_string(),
                expected: ObjectKind::File,
                found: ObjectKind::Directory,
            }),
        }
    }

    pub(crate) fn require_directory(self, path: &str) -> Result<Directory> {
        match self {
            GridObject::Directory(dir) => Ok(dir),
            GridObject::File(_) => Err(GridError::TypeMismatch {
                path: path.to_string(),
                expected: ObjectKind::Directory,
                found: ObjectKind::File,
            }),
        }
    }
}

impl GridNode for GridObject {
    fn node(&self) -> &Node {
        match self {
            GridObject::File(file) => file.node(),
            GridObject::Directory(dir) => dir.node(),
        }
    }
}

impl AsCapability for GridObject {
    fn capability(&self) -> &str {
        self.cap().as_str()
    }
}

impl From<File> for GridObject {
    fn from(file: File) -> Self {
        GridObject::File(file)
    }
}

impl From<Directory> for GridObject {
    fn from(dir: Directory) -> Self {
        GridObject::Directory(dir)
    }
}
