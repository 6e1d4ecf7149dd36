//! File objects

use crate::capability::{AsCapability, CapSet, Capability};
use crate::endpoint::{api_error, is_gone, ServerEndpoint};
use crate::error::{GridError, Result};
use crate::object::{GridNode, Node};
use bytes::Bytes;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::Method;
use tracing::debug;

/// An immutable or mutable byte blob
#[derive(Debug, Clone)]
pub struct File {
    node: Node,
    known_size: Option<u64>,
}

impl File {
    pub(crate) fn from_node(node: Node, known_size: Option<u64>) -> Self {
        Self { node, known_size }
    }

    /// Upload `data` as a new unlinked file.
    ///
    /// Immutable uploads return a read-only capability and their size is
    /// known from then on. Mutable uploads return a write capability and
    /// their size is probed on demand.
    pub async fn create(
        endpoint: &ServerEndpoint,
        data: impl Into<Bytes>,
        mutable: bool,
    ) -> Result<Self> {
        let data = data.into();
        let size = data.len() as u64;
        let target = if mutable { "/uri?mutable=true" } else { "/uri" };

        let request = endpoint
            .request(Method::PUT, target)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(data);
        let response = endpoint.send(request).await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let cap = Capability::from_response(&response.text().await?)?;
        debug!(size, mutable, "Uploaded file");

        Ok(if mutable {
            Self::from_node(Node::new(endpoint.clone(), CapSet::read_write(cap), true), None)
        } else {
            Self::from_node(
                Node::new(endpoint.clone(), CapSet::read_only(cap), false),
                Some(size),
            )
        })
    }

    /// Size reported when this handle was constructed, if any
    pub fn known_size(&self) -> Option<u64> {
        self.known_size
    }

    /// Size in bytes.
    ///
    /// Uses the size known at construction; otherwise issues a `HEAD` probe
    /// on every call, since a mutable file may change between calls.
    pub async fn size(&self) -> Result<u64> {
        if let Some(size) = self.known_size {
            return Ok(size);
        }

        let endpoint = self.node.endpoint();
        let response = endpoint
            .send(endpoint.request(Method::HEAD, &self.node.path("")))
            .await?;
        let status = response.status();

        if is_gone(status) {
            return Err(GridError::NotFound(self.cap().to_string()));
        }
        if !status.is_success() {
            return Err(api_error(response).await);
        }

        response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| GridError::Protocol("size probe returned no content-length".to_string()))
    }

    /// Download the file contents
    pub async fn data(&self) -> Result<Bytes> {
        let endpoint = self.node.endpoint();
        let response = endpoint
            .send(endpoint.request(Method::GET, &self.node.path("")))
            .await?;
        let status = response.status();

        if is_gone(status) {
            return Err(GridError::NotFound(self.cap().to_string()));
        }
        if !status.is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.bytes().await?)
    }
}

impl GridNode for File {
    fn node(&self) -> &Node {
        &self.node
    }
}

impl AsCapability for File {
    fn capability(&self) -> &str {
        self.cap().as_str()
    }
}
