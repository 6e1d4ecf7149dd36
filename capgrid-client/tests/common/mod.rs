//! Shared fixtures for the mock-server tests

#![allow(dead_code)]

use capgrid_client::metadata::NodeEntry;
use capgrid_client::{Directory, GridObject, ServerEndpoint};
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{json, Value};

pub const ROOT_RW: &str = "URI:DIR2:rwroot:abcd";
pub const ROOT_RO: &str = "URI:DIR2-RO:roroot:abcd";

pub fn endpoint(server: &ServerGuard) -> ServerEndpoint {
    ServerEndpoint::new(&server.url()).unwrap()
}

/// A directory handle built from metadata, without any request
pub fn directory(server: &ServerGuard, rw: Option<&str>, ro: Option<&str>) -> Directory {
    let entry: NodeEntry =
        serde_json::from_value(json!(["dirnode", {"rw_uri": rw, "ro_uri": ro, "mutable": true}]))
            .unwrap();
    GridObject::from_entry(&endpoint(server), &entry)
        .unwrap()
        .into_directory()
        .unwrap()
}

pub fn writeable_root(server: &ServerGuard) -> Directory {
    directory(server, Some(ROOT_RW), Some(ROOT_RO))
}

pub fn read_only_root(server: &ServerGuard) -> Directory {
    directory(server, None, Some(ROOT_RO))
}

pub fn filenode(ro: &str, size: u64) -> Value {
    json!(["filenode", {"ro_uri": ro, "mutable": false, "size": size}])
}

pub fn subdir(rw: &str) -> Value {
    json!(["dirnode", {"rw_uri": rw, "mutable": true}])
}

/// Body of a `?t=json` answer for a directory with the given children.
///
/// `children` is a list so the server order is explicit.
pub fn dir_body(rw: &str, children: &[(&str, Value)]) -> String {
    let children: Vec<String> = children
        .iter()
        .map(|(name, child)| format!("{}: {}", json!(name), child))
        .collect();
    format!(
        r#"["dirnode", {{"rw_uri": {}, "mutable": true, "children": {{{}}}}}]"#,
        json!(rw),
        children.join(", ")
    )
}

pub async fn mock_json(server: &mut ServerGuard, path: &str, body: String) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect(1)
        .create_async()
        .await
}

/// Mocks that fail the test if any mutating request reaches the server
pub async fn forbid_writes(server: &mut ServerGuard) -> Vec<Mock> {
    let mut mocks = Vec::new();
    for method in ["PUT", "POST", "DELETE"] {
        mocks.push(
            server
                .mock(method, Matcher::Any)
                .expect(0)
                .create_async()
                .await,
        );
    }
    mocks
}
