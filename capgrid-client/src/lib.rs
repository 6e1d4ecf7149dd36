//! capgrid client library
//!
//! Client for the HTTP object API of a capability-addressed storage grid.
//! Files and directories are addressed by opaque capability strings; all
//! storage, erasure coding and repair logic lives on the grid server.
//!
//! This crate provides:
//! - [`ServerEndpoint`]: where requests go, with per-request timeouts
//! - [`GridObject`]: a [`File`] or a [`Directory`] resolved from a capability
//! - directory operations: lookup, attach, mkdir, listing, recursive prefix
//!   search, delete and (non-atomic) rename
//! - integrity checks and repair
//!
//! ```no_run
//! use capgrid_client::{Directory, GridNode, ServerEndpoint};
//!
//! # async fn demo() -> capgrid_client::Result<()> {
//! let endpoint = ServerEndpoint::new("http://127.0.0.1:3456")?;
//! let root = Directory::create(&endpoint).await?;
//! root.mkdir("docs").await?;
//! root.put_file("docs/hello.txt", "hello grid", false).await?;
//! assert_eq!(root.get_file("docs/hello.txt").await?, "hello grid");
//! println!("root: {}", root.cap());
//! # Ok(())
//! # }
//! ```

pub mod capability;
pub mod check;
pub mod directory;
pub mod endpoint;
pub mod error;
pub mod file;
pub mod metadata;
pub mod object;
pub mod path;

pub use capability::{AsCapability, CapSet, Capability};
pub use check::{CheckOptions, RepairOutcome};
pub use directory::Directory;
pub use endpoint::{ClientConfig, ServerEndpoint};
pub use error::{GridError, Result};
pub use file::File;
pub use object::{GridNode, GridObject, Node, ObjectKind};
