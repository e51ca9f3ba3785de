//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Location is empty after normalization
    #[error("Invalid location: {0:?}")]
    InvalidLocation(String),

    /// URL failed syntactic validation
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Units system not recognized
    #[error("Invalid units: {0}")]
    InvalidUnits(String),

    /// Main parameter not in the catalog
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),
}
