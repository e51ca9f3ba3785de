//! Weather API port
//!
//! Defines the interface for raw requests against the weather API.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RequestFailure;

/// Successful response of the weather API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Reason phrase, `Success` when none was sent
    pub status_text: String,
    /// Decoded JSON body
    pub data: Value,
}

/// Port for weather API requests
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherApiPort: Send + Sync {
    /// Issue a request with the given query parameters
    ///
    /// Failures of any kind are normalized into [`RequestFailure`].
    async fn request(&self, params: &[(String, String)]) -> Result<ApiResponse, RequestFailure>;
}
