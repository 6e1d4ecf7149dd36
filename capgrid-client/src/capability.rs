//! Capabilities
//!
//! A capability is an opaque bearer token granting read-write, read-only or
//! verify/repair-only access to one grid object. The client never parses it;
//! which slot a capability occupies is decided by the server's metadata.

use crate::error::{GridError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque capability string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(String);

impl Capability {
    pub fn new(cap: impl Into<String>) -> Self {
        Self(cap.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Parse a capability returned in a response body.
    ///
    /// The server may terminate the body with a newline.
    pub(crate) fn from_response(body: &str) -> Result<Self> {
        let cap = body.trim();
        if cap.is_empty() {
            return Err(GridError::Protocol(
                "server returned an empty capability".to_string(),
            ));
        }
        Ok(Self(cap.to_string()))
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Capability {
    fn from(cap: String) -> Self {
        Self(cap)
    }
}

impl From<&str> for Capability {
    fn from(cap: &str) -> Self {
        Self(cap.to_string())
    }
}

/// The three capability slots of a grid object.
///
/// At least one slot is always filled; [`CapSet::new`] rejects an empty set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapSet {
    rw: Option<Capability>,
    ro: Option<Capability>,
    repair: Option<Capability>,
}

impl CapSet {
    pub fn new(
        rw: Option<Capability>,
        ro: Option<Capability>,
        repair: Option<Capability>,
    ) -> Result<Self> {
        if rw.is_none() && ro.is_none() && repair.is_none() {
            return Err(GridError::Protocol(
                "object metadata carries no capability".to_string(),
            ));
        }
        Ok(Self { rw, ro, repair })
    }

    pub fn read_write(cap: Capability) -> Self {
        Self {
            rw: Some(cap),
            ro: None,
            repair: None,
        }
    }

    pub fn read_only(cap: Capability) -> Self {
        Self {
            rw: None,
            ro: Some(cap),
            repair: None,
        }
    }

    pub fn rw(&self) -> Option<&Capability> {
        self.rw.as_ref()
    }

    pub fn ro(&self) -> Option<&Capability> {
        self.ro.as_ref()
    }

    pub fn repair(&self) -> Option<&Capability> {
        self.repair.as_ref()
    }

    /// The capability with the highest permission: read-write, then
    /// read-only, then repair.
    pub fn effective(&self) -> &Capability {
        self.rw
            .as_ref()
            .or(self.ro.as_ref())
            .or(self.repair.as_ref())
            .unwrap_or_else(|| unreachable!("CapSet is never empty"))
    }

    pub fn is_readable(&self) -> bool {
        self.ro.is_some()
    }

    pub fn is_writeable(&self) -> bool {
        self.rw.is_some()
    }
}

/// Anything that can be linked into a directory by capability.
pub trait AsCapability {
    fn capability(&self) -> &str;
}

impl AsCapability for Capability {
    fn capability(&self) -> &str {
        self.as_str()
    }
}

impl AsCapability for str {
    fn capability(&self) -> &str {
        self
    }
}

impl AsCapability for String {
    fn capability(&self) -> &str {
        self.as_str()
    }
}
