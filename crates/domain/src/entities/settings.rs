//! Data source settings
//!
//! The options object a host stores for one configured data source. Plain
//! settings live in `json_data`; secrets are write-only and live in
//! `secure_json_data` until the host persists them, after which only the
//! matching `secure_json_fields` flag remains visible.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::WeatherUnits;

/// Non-secret connection settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceJsonData {
    /// Weather API endpoint, e.g. `https://api.openweathermap.org/data/2.5/forecast`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Default measurement system
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<WeatherUnits>,

    /// Optional path appended to the URL by some deployments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Secrets entered through the configuration form
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecureJsonData {
    /// API key sent with every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl fmt::Debug for SecureJsonData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureJsonData")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Which secrets the host has stored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecureJsonFields {
    /// The API key is configured
    #[serde(default)]
    pub api_key: bool,
}

/// Complete options object for a weather data source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceSettings {
    /// Non-secret settings
    #[serde(default)]
    pub json_data: DataSourceJsonData,

    /// Pending secret values
    #[serde(default)]
    pub secure_json_data: SecureJsonData,

    /// Configured flags for secrets
    #[serde(default)]
    pub secure_json_fields: SecureJsonFields,
}

impl DataSourceSettings {
    /// Create settings for an endpoint
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            json_data: DataSourceJsonData {
                url: Some(url.into()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Whether the API key has been stored by the host
    #[must_use]
    pub const fn api_key_configured(&self) -> bool {
        self.secure_json_fields.api_key
    }

    /// Units configured for the data source, defaulting to metric
    #[must_use]
    pub fn units(&self) -> WeatherUnits {
        self.json_data.units.unwrap_or_default()
    }

    /// Apply what a host does when it persists the options
    ///
    /// A non-empty pending API key becomes a configured flag. An empty one
    /// leaves the flag untouched.
    pub fn mark_saved(&mut self) {
        if self
            .secure_json_data
            .api_key
            .as_deref()
            .is_some_and(|key| !key.is_empty())
        {
            self.secure_json_fields.api_key = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sets_url_only() {
        let settings = DataSourceSettings::new("https://example.com/forecast");
        assert_eq!(
            settings.json_data.url.as_deref(),
            Some("https://example.com/forecast")
        );
        assert!(!settings.api_key_configured());
        assert_eq!(settings.units(), WeatherUnits::Metric);
    }

    #[test]
    fn mark_saved_flags_non_empty_key() {
        let mut settings = DataSourceSettings::default();
        settings.secure_json_data.api_key = Some("abc".to_string());
        settings.mark_saved();
        assert!(settings.api_key_configured());
    }

    #[test]
    fn mark_saved_ignores_empty_key() {
        let mut settings = DataSourceSettings::default();
        settings.secure_json_data.api_key = Some(String::new());
        settings.mark_saved();
        assert!(!settings.api_key_configured());
    }

    #[test]
    fn debug_redacts_api_key() {
        let data = SecureJsonData {
            api_key: Some("super-secret".to_string()),
        };
        let debug = format!("{data:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn serializes_camel_case() {
        let mut settings = DataSourceSettings::new("https://example.com");
        settings.json_data.units = Some(WeatherUnits::Imperial);
        settings.secure_json_fields.api_key = true;

        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["jsonData"]["url"], "https://example.com");
        assert_eq!(json["jsonData"]["units"], "imperial");
        assert_eq!(json["secureJsonFields"]["apiKey"], true);
    }

    #[test]
    fn deserializes_partial_document() {
        let settings: DataSourceSettings =
            serde_json::from_str(r#"{"jsonData":{"url":"http://x"}}"#).unwrap();
        assert_eq!(settings.json_data.url.as_deref(), Some("http://x"));
        assert!(settings.secure_json_data.api_key.is_none());
    }
}
