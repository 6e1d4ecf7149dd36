//! Error types for the grid client
//!
//! Every operation surfaces failures synchronously through [`GridError`].
//! Nothing in the client retries or swallows an error, with the single
//! exception of the parent lookup in `list_paths_starting_with`.

use crate::object::ObjectKind;
use thiserror::Error;

/// Result type alias for grid operations
pub type Result<T> = std::result::Result<T, GridError>;

/// Unified error type for grid operations
#[derive(Error, Debug)]
pub enum GridError {
    // ===== Object model errors =====
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Read-only: cannot modify '{0}' without a write capability")]
    ReadOnly(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Type mismatch at '{path}': expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: ObjectKind,
        found: ObjectKind,
    },

    // ===== Server errors =====
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Protocol error: {0}")]
    Protocol(String),

    // ===== Transport errors =====
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl GridError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, GridError::NotFound(_))
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self, GridError::ReadOnly(_))
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, GridError::AlreadyExists(_))
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, GridError::TypeMismatch { .. })
    }
}
