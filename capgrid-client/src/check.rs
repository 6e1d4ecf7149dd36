//! Integrity checks and repair
//!
//! Both run server-side and can take hours on large objects, so they use the
//! endpoint's long check timeout instead of the ordinary request timeout.
//! The result schema belongs to the server; only the fields needed to answer
//! `healthy` and the repair outcome are read here.

use crate::directory::Directory;
use crate::endpoint::api_error;
use crate::error::{GridError, Result};
use crate::file::File;
use crate::object::{GridNode, GridObject, Node};
use reqwest::Method;
use serde_json::Value;
use tracing::info;

/// Flags passed along with a check or repair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Download and verify every share instead of only asking servers
    pub verify: bool,
    /// Renew the storage lease of every share found
    pub add_lease: bool,
}

impl CheckOptions {
    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    pub fn add_lease(mut self, add_lease: bool) -> Self {
        self.add_lease = add_lease;
        self
    }

    fn query(&self, repair: bool) -> String {
        let repair = if repair { "&repair=true" } else { "" };
        format!(
            "t=check{}&verify={}&add-lease={}&output=JSON",
            repair, self.verify, self.add_lease
        )
    }
}

/// What a repair request did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairOutcome {
    /// The object was healthy enough that no repair was attempted
    NotAttempted,
    Succeeded,
    Failed,
}

impl RepairOutcome {
    /// `None` when nothing was attempted, otherwise whether the repair worked
    pub fn as_option(self) -> Option<bool> {
        match self {
            RepairOutcome::NotAttempted => None,
            RepairOutcome::Succeeded => Some(true),
            RepairOutcome::Failed => Some(false),
        }
    }

    pub(crate) fn from_response(body: &Value) -> Result<Self> {
        let attempted = body
            .get("repair-attempted")
            .and_then(Value::as_bool)
            .ok_or_else(|| GridError::Protocol("repair response lacks repair-attempted".to_string()))?;
        if !attempted {
            return Ok(RepairOutcome::NotAttempted);
        }
        let succeeded = body
            .get("repair-successful")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        Ok(if succeeded {
            RepairOutcome::Succeeded
        } else {
            RepairOutcome::Failed
        })
    }
}

impl Node {
    async fn post_check(&self, options: CheckOptions, repair: bool) -> Result<Value> {
        let endpoint = self.endpoint();
        let target = format!("{}?{}", self.path(""), options.query(repair));
        let response = endpoint
            .send(endpoint.long_request(Method::POST, &target))
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Run a server-side check; returns the server's `results` object as is.
    pub async fn check(&self, options: CheckOptions) -> Result<Value> {
        let mut body = self.post_check(options, false).await?;
        match body.get_mut("results") {
            Some(results) => Ok(results.take()),
            None => Err(GridError::Protocol(
                "check response lacks results".to_string(),
            )),
        }
    }

    /// Check and repair if needed
    pub async fn repair(&self, options: CheckOptions) -> Result<RepairOutcome> {
        let body = self.post_check(options, true).await?;
        let outcome = RepairOutcome::from_response(&body)?;
        info!(outcome = ?outcome, "Repair finished");
        Ok(outcome)
    }

    /// The `healthy` flag of a default check
    pub async fn healthy(&self) -> Result<bool> {
        self.check(CheckOptions::default())
            .await?
            .get("healthy")
            .and_then(Value::as_bool)
            .ok_or_else(|| GridError::Protocol("check results lack healthy".to_string()))
    }
}

macro_rules! integrity_ops {
    ($($ty:ty),*) => {
        $(
            impl $ty {
                /// Run a server-side check; see [`Node::check`]
                pub async fn check(&self, options: CheckOptions) -> Result<Value> {
                    self.node().check(options).await
                }

                /// Check and repair if needed; see [`Node::repair`]
                pub async fn repair(&self, options: CheckOptions) -> Result<RepairOutcome> {
                    self.node().repair(options).await
                }

                pub async fn healthy(&self) -> Result<bool> {
                    self.node().healthy().await
                }
            }
        )*
    };
}

integrity_ops!(GridObject, File, Directory);
