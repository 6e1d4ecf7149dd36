//! JSON metadata returned by `?t=json` requests
//!
//! The server answers with a two-element array `[type, attributes]`, where
//! `type` is `"dirnode"` or `"filenode"`. Directory attributes carry a
//! `children` map of the same `[type, attributes]` pairs, in server order.

use crate::capability::{CapSet, Capability};
use crate::error::Result;
use indexmap::IndexMap;
use serde::Deserialize;

/// Type tag used by the server for directories
pub const DIRNODE: &str = "dirnode";

/// A `[type, attributes]` pair
#[derive(Debug, Clone, Deserialize)]
pub struct NodeEntry(pub String, pub NodeAttrs);

impl NodeEntry {
    pub fn is_dirnode(&self) -> bool {
        self.0 == DIRNODE
    }

    pub fn attrs(&self) -> &NodeAttrs {
        &self.1
    }
}

/// Attributes of a file or directory node
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeAttrs {
    #[serde(default)]
    pub rw_uri: Option<String>,
    #[serde(default)]
    pub ro_uri: Option<String>,
    #[serde(default)]
    pub verify_uri: Option<String>,
    #[serde(default)]
    pub mutable: bool,
    #[serde(default)]
    pub size: Option<SizeField>,
    #[serde(default)]
    pub children: Option<IndexMap<String, NodeEntry>>,
}

impl NodeAttrs {
    pub fn caps(&self) -> Result<CapSet> {
        CapSet::new(
            self.rw_uri.clone().map(Capability::from),
            self.ro_uri.clone().map(Capability::from),
            self.verify_uri.clone().map(Capability::from),
        )
    }

    /// Size reported by the server; `None` when it reported `"?"` or nothing.
    pub fn known_size(&self) -> Option<u64> {
        match self.size {
            Some(SizeField::Known(size)) => Some(size),
            _ => None,
        }
    }
}

/// The `size` attribute is either a byte count or the marker `"?"`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SizeField {
    Known(u64),
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filenode() {
        let json = r#"["filenode", {"ro_uri": "URI:CHK:abc", "verify_uri": "URI:CHK-Verifier:abc", "mutable": false, "size": 131072}]"#;
        let entry: NodeEntry = serde_json::from_str(json).unwrap();
        assert!(!entry.is_dirnode());
        assert_eq!(entry.attrs().known_size(), Some(131072));
        let caps = entry.attrs().caps().unwrap();
        assert_eq!(caps.effective().as_str(), "URI:CHK:abc");
        assert!(caps.rw().is_none());
    }

    #[test]
    fn test_parse_unknown_size() {
        let json = r#"["filenode", {"rw_uri": "URI:SSK:abc", "mutable": true, "size": "?"}]"#;
        let entry: NodeEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.attrs().size, Some(SizeField::Unknown("?".to_string())));
        assert_eq!(entry.attrs().known_size(), None);
        assert!(entry.attrs().mutable);
    }

    #[test]
    fn test_parse_dirnode_children_in_server_order() {
        let json = r#"["dirnode", {
            "rw_uri": "URI:DIR2:rw",
            "ro_uri": "URI:DIR2-RO:ro",
            "verify_uri": null,
            "mutable": true,
            "children": {
                "zeta": ["filenode", {"ro_uri": "URI:CHK:z", "size": 3, "metadata": {"ctime": 1.0}}],
                "alpha": ["dirnode", {"rw_uri": "URI:DIR2:a", "mutable": true}],
                "mid": ["filenode", {"ro_uri": "URI:CHK:m", "size": 1}]
            }
        }]"#;
        let entry: NodeEntry = serde_json::from_str(json).unwrap();
        assert!(entry.is_dirnode());
        let children = entry.attrs().children.as_ref().unwrap();
        let names: Vec<&str> = children.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert!(children["alpha"].is_dirnode());
    }

    #[test]
    fn test_attrs_without_caps_rejected() {
        let json = r#"["filenode", {"mutable": false}]"#;
        let entry: NodeEntry = serde_json::from_str(json).unwrap();
        assert!(entry.attrs().caps().is_err());
    }
}
