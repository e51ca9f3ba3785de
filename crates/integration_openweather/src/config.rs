//! OpenWeather client configuration

use domain::WeatherUnits;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// HTTP verb used for forecast requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}

/// Configuration for the weather API client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenWeatherConfig {
    /// Forecast endpoint (default: <https://api.openweathermap.org/data/2.5/forecast>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional path appended to `base_url`
    #[serde(default)]
    pub path: Option<String>,

    /// API key sent as `appid` (never serialized)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Units used when a request does not name any
    #[serde(default)]
    pub default_units: WeatherUnits,

    /// HTTP verb
    #[serde(default)]
    pub method: HttpMethod,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5/forecast".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            path: None,
            api_key: None,
            default_units: WeatherUnits::default(),
            method: HttpMethod::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl OpenWeatherConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Full endpoint: `base_url` joined with `path`
    #[must_use]
    pub fn endpoint(&self) -> String {
        match self.path.as_deref().map(|p| p.trim_matches('/')) {
            Some(path) if !path.is_empty() => {
                format!("{}/{path}", self.base_url.trim_end_matches('/'))
            },
            _ => self.base_url.clone(),
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OpenWeatherConfig::default();
        assert_eq!(
            config.base_url,
            "https://api.openweathermap.org/data/2.5/forecast"
        );
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.method, HttpMethod::Get);
        assert_eq!(config.default_units, WeatherUnits::Metric);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_endpoint_joins_path() {
        let mut config = OpenWeatherConfig::for_testing("http://localhost:8080/");
        assert_eq!(config.endpoint(), "http://localhost:8080/");

        config.path = Some("/data/2.5/forecast".to_string());
        assert_eq!(config.endpoint(), "http://localhost:8080/data/2.5/forecast");

        config.path = Some("/".to_string());
        assert_eq!(config.endpoint(), "http://localhost:8080/");
    }

    #[test]
    fn test_validation() {
        assert!(OpenWeatherConfig::default().validate().is_ok());

        let config = OpenWeatherConfig {
            base_url: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = OpenWeatherConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_key_is_not_serialized() {
        let config = OpenWeatherConfig {
            api_key: Some(SecretString::from("secret-key")),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret-key"));
        assert!(!json.contains("api_key"));
    }

    #[test]
    fn test_method_deserializes_uppercase() {
        let config: OpenWeatherConfig =
            serde_json::from_str(r#"{"method":"POST","api_key":"k"}"#).unwrap();
        assert_eq!(config.method, HttpMethod::Post);
        assert!(config.api_key.is_some());
    }
}
