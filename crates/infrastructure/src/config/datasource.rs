//! Weather API data source configuration.

use domain::{DataSourceSettings, WeatherUnits};
use integration_openweather::{HttpMethod, OpenWeatherConfig};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Weather API data source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSourceConfig {
    /// Forecast endpoint
    #[serde(default = "default_url")]
    pub url: String,

    /// Optional path appended to `url`
    #[serde(default)]
    pub path: Option<String>,

    /// Default measurement system
    #[serde(default)]
    pub units: WeatherUnits,

    /// API key (never serialized)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// HTTP verb
    #[serde(default)]
    pub method: HttpMethod,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_url() -> String {
    "https://api.openweathermap.org/data/2.5/forecast".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            path: None,
            units: WeatherUnits::default(),
            api_key: None,
            method: HttpMethod::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl DataSourceConfig {
    /// Whether a non-empty API key is present
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().is_empty())
    }

    /// Overlay settings saved through the configuration form
    ///
    /// Only values that are present in the settings replace the current ones.
    /// An empty pending key (a reset) removes the configured key.
    pub fn apply_settings(&mut self, settings: &DataSourceSettings) {
        if let Some(url) = settings.json_data.url.as_deref().filter(|u| !u.is_empty()) {
            self.url = url.to_string();
        }
        if let Some(path) = &settings.json_data.path {
            self.path = Some(path.clone());
        }
        if let Some(units) = settings.json_data.units {
            self.units = units;
        }
        match settings.secure_json_data.api_key.as_deref() {
            Some("") => self.api_key = None,
            Some(key) => self.api_key = Some(SecretString::from(key.to_string())),
            None => {},
        }
    }

    /// Settings as a host would present them, with the secret withheld
    #[must_use]
    pub fn to_settings(&self) -> DataSourceSettings {
        let mut settings = DataSourceSettings::new(self.url.clone());
        settings.json_data.units = Some(self.units);
        settings.json_data.path.clone_from(&self.path);
        settings.secure_json_fields.api_key = self.has_api_key();
        settings
    }

    /// Configuration for the HTTP client
    #[must_use]
    pub fn to_client_config(&self) -> OpenWeatherConfig {
        OpenWeatherConfig {
            base_url: self.url.clone(),
            path: self.path.clone(),
            api_key: self.api_key.clone(),
            default_units: self.units,
            method: self.method,
            timeout_secs: self.timeout_secs,
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        application::editors::validate_url(&self.url).map_err(|e| format!("datasource.url: {e}"))?;
        if self.url.is_empty() {
            return Err("datasource.url must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("datasource.timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}
