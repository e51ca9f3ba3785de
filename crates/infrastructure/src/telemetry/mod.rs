//! Logging setup
//!
//! Installs the global `tracing` subscriber used by both binaries.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, LoggingConfig};

/// Build the filter: `RUST_LOG`, then the configured directive, then `fallback`
#[must_use]
pub fn build_filter(config: &LoggingConfig, fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.filter.as_deref().unwrap_or(fallback)))
        .unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install the global subscriber
///
/// # Errors
///
/// Returns an error if a global subscriber is already set.
pub fn init_logging(
    config: &LoggingConfig,
    fallback: &str,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = build_filter(config, fallback);
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .try_init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    }
}
