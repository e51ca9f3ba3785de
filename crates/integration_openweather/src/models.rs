//! Response envelope

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A successful response: status line plus the decoded JSON body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchResponse {
    /// HTTP status code
    pub status: u16,
    /// Canonical reason phrase of the status code, `Success` when there is
    /// none
    pub status_text: String,
    /// Decoded body
    pub data: Value,
}

impl FetchResponse {
    pub(crate) fn new(status: u16, reason: Option<&str>, data: Value) -> Self {
        Self {
            status,
            status_text: reason
                .filter(|r| !r.is_empty())
                .unwrap_or("Success")
                .to_string(),
            data,
        }
    }
}
