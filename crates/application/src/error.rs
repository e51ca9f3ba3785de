//! Application-level errors

use domain::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Normalized failure of an outbound request
///
/// Every adapter-level failure is reported in the same shape: status
/// `"error"`, a status text describing the cause and no data.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{status_text}")]
#[serde(rename_all = "camelCase")]
pub struct RequestFailure {
    /// Always `"error"`
    pub status: String,
    /// Cause of the failure
    pub status_text: String,
    /// Always `None`
    pub data: Option<Value>,
}

impl RequestFailure {
    /// Wrap an error message
    pub fn new(status_text: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            status_text: status_text.into(),
            data: None,
        }
    }

    /// Failure with no usable message
    #[must_use]
    pub fn unknown() -> Self {
        Self::new("Unknown error")
    }
}

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Outbound request failed
    #[error(transparent)]
    Request(#[from] RequestFailure),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
