//! Error taxonomy for tree generation runs.

use thiserror::Error;

/// A geometry host rejected one of its primitive calls
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{operation} failed: {message}")]
pub struct BackendError {
    /// Which primitive failed: `createCircle`, `extrude` or `delete`
    pub operation: &'static str,
    pub message: String,
}

impl BackendError {
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TreeError {
    /// Out-of-range parameter or degenerate start pose; nothing was emitted
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// The backend failed mid-run; segments emitted before it remain
    #[error("geometry backend error: {0}")]
    Backend(#[from] BackendError),
    #[error("parameter document error: {0}")]
    Params(String),
}

pub type Result<T, E = TreeError> = std::result::Result<T, E>;
