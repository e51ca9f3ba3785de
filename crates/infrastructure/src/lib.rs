//! Infrastructure layer - Adapters for external systems
//!
//! Implements the weather API port on top of the OpenWeather client and
//! provides configuration loading and logging setup for the binaries.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, DataSourceConfig, LogFormat, LoggingConfig, ServerConfig};
pub use telemetry::init_logging;
