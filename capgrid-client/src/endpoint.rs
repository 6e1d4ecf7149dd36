//! Server endpoint
//!
//! HTTP plumbing shared by every grid object: the parsed server origin, the
//! reqwest client and the per-request timeouts. Redirects are not followed so
//! that the legacy 300/301 answers of older servers reach the status mapping.

use crate::error::{GridError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default timeout for ordinary reads and writes
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Default timeout for check and repair, which may run for hours on large objects
pub const DEFAULT_CHECK_TIMEOUT: Duration = Duration::from_secs(6 * 60 * 60);

/// Transport settings for an endpoint
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Timeout applied to every request except check/repair
    pub request_timeout: Duration,
    /// Timeout applied to check/repair requests
    pub check_timeout: Duration,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            check_timeout: DEFAULT_CHECK_TIMEOUT,
            user_agent: concat!("capgrid/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Where all requests for an object are sent.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ServerEndpoint {
    base: Url,
    origin: String,
    client: Client,
    config: ClientConfig,
}

impl ServerEndpoint {
    /// Create an endpoint with default settings
    pub fn new(url: &str) -> Result<Self> {
        Self::with_config(url, ClientConfig::default())
    }

    /// Create an endpoint with explicit transport settings
    pub fn with_config(url: &str, config: ClientConfig) -> Result<Self> {
        let base = Url::parse(url)?;
        match base.scheme() {
            "http" | "https" => {}
            other => {
                return Err(GridError::InvalidArgument(format!(
                    "unsupported URL scheme '{}'",
                    other
                )))
            }
        }
        if base.host_str().is_none() {
            return Err(GridError::InvalidArgument(format!(
                "server URL '{}' has no host",
                url
            )));
        }

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            origin: base.origin().ascii_serialization(),
            base,
            client,
            config,
        })
    }

    pub fn scheme(&self) -> &str {
        self.base.scheme()
    }

    pub fn host(&self) -> &str {
        self.base.host_str().unwrap_or_default()
    }

    pub fn port(&self) -> Option<u16> {
        self.base.port_or_known_default()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URL for a request path (with optional query)
    pub fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.origin, path_and_query)
    }

    pub(crate) fn request(&self, method: Method, path_and_query: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(path_and_query))
            .timeout(self.config.request_timeout)
    }

    pub(crate) fn long_request(&self, method: Method, path_and_query: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(path_and_query))
            .timeout(self.config.check_timeout)
    }

    /// `PUT` a capability string as a plain-text body
    pub(crate) fn put_text(&self, path_and_query: &str, body: &str) -> RequestBuilder {
        self.request(Method::PUT, path_and_query)
            .header(CONTENT_TYPE, "text/plain")
            .body(body.to_string())
    }

    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = request.build()?;
        let method = request.method().clone();
        let target = redact(request.url().path());
        let response = self.client.execute(request).await?;
        debug!(
            method = %method,
            target = %target,
            status = response.status().as_u16(),
            "Grid request"
        );
        Ok(response)
    }
}

/// True for the statuses treated as "gone": 404 plus the ambiguous
/// redirects some older server versions answer with.
pub(crate) fn is_gone(status: StatusCode) -> bool {
    status == StatusCode::NOT_FOUND
        || status == StatusCode::MULTIPLE_CHOICES
        || status == StatusCode::MOVED_PERMANENTLY
}

/// Turn an unexpected response into an API error carrying the body text
pub(crate) async fn api_error(response: Response) -> GridError {
    GridError::Api {
        status: response.status().as_u16(),
        message: response.text().await.unwrap_or_default(),
    }
}

/// Hide the capability in `/uri/<cap>/...` so logs never carry bearer tokens
fn redact(path: &str) -> String {
    match path.strip_prefix("/uri/") {
        Some(rest) => match rest.find('/') {
            Some(idx) => format!("/uri/<cap>{}", &rest[idx..]),
            None => "/uri/<cap>".to_string(),
        },
        None => path.to_string(),
    }
}
