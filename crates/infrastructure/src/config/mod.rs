//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `datasource`: weather API connection
//! - `logging`: log output format and filter

mod datasource;
mod logging;
mod server;

use serde::{Deserialize, Serialize};

pub use datasource::DataSourceConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Environment variable prefix, e.g. `WEATHERFRAME_SERVER__PORT`
pub const ENV_PREFIX: &str = "WEATHERFRAME";

/// Separator between nested keys in environment variable names
///
/// Doubled so that field names keep their single underscores:
/// `WEATHERFRAME_DATASOURCE__API_KEY` sets `datasource.api_key`.
pub const ENV_SEPARATOR: &str = "__";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Weather API data source
    #[serde(default)]
    pub datasource: DataSourceConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional `config.toml`
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or deserialized.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration with a custom file name (extension optional)
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or deserialized.
    pub fn load_from(file: &str) -> Result<Self, config::ConfigError> {
        Self::build(file, None)
    }

    fn build(
        file: &str,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            // Load from file if exists
            .add_source(config::File::with_name(file).required(false))
            // Override with environment variables (e.g., WEATHERFRAME_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR)
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true)
                    .source(env),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.server.validate()?;
        self.datasource.validate()?;
        self.logging.validate()
    }
}
