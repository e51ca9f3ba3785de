//! OpenWeather HTTP client
//!
//! Issues forecast requests against `{endpoint}?q=<location>&units=<units>`
//! and returns the decoded JSON body together with the status line.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use secrecy::ExposeSecret;
use tracing::{debug, instrument};

use crate::config::{HttpMethod, OpenWeatherConfig};
use crate::error::OpenWeatherError;
use crate::models::FetchResponse;

/// Weather API client trait
#[async_trait]
pub trait WeatherApiClient: Send + Sync {
    /// Issue a request with the given query parameters
    ///
    /// Parameters are merged over the defaults (`units`, `appid`); a later
    /// value for the same name wins.
    ///
    /// The status text of a successful response is the canonical reason
    /// phrase of its status code; a custom phrase sent by the server is not
    /// preserved.
    async fn fetch(&self, params: &[(String, String)]) -> Result<FetchResponse, OpenWeatherError>;
}

/// reqwest-backed implementation
#[derive(Debug)]
pub struct OpenWeatherClient {
    client: Client,
    config: OpenWeatherConfig,
}

impl OpenWeatherClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: OpenWeatherConfig) -> Result<Self, OpenWeatherError> {
        config
            .validate()
            .map_err(OpenWeatherError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OpenWeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &OpenWeatherConfig {
        &self.config
    }

    /// Merge default parameters with the caller's
    fn merge_params(&self, params: &[(String, String)]) -> BTreeMap<String, String> {
        let mut merged = BTreeMap::new();
        merged.insert(
            "units".to_string(),
            self.config.default_units.as_str().to_string(),
        );
        if let Some(key) = &self.config.api_key {
            merged.insert("appid".to_string(), key.expose_secret().to_string());
        }
        for (name, value) in params {
            merged.insert(name.clone(), value.clone());
        }
        merged
    }

    /// Build the request URL
    fn build_url(&self, params: &[(String, String)]) -> Result<Url, OpenWeatherError> {
        let mut url = Url::parse(&self.config.endpoint())
            .map_err(|e| OpenWeatherError::ConfigurationError(format!("Invalid base URL: {e}")))?;
        url.query_pairs_mut().extend_pairs(self.merge_params(params));
        Ok(url)
    }

    /// Strip the API key before a URL is logged
    fn redacted(url: &Url) -> String {
        let mut shown = url.clone();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| {
                let v = if k == "appid" { "***".into() } else { v };
                (k.into_owned(), v.into_owned())
            })
            .collect();
        shown.query_pairs_mut().clear().extend_pairs(pairs);
        shown.to_string()
    }

    fn map_send_error(&self, err: &reqwest::Error) -> OpenWeatherError {
        if err.is_timeout() {
            OpenWeatherError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else if err.is_connect() {
            OpenWeatherError::ConnectionFailed(err.to_string())
        } else {
            OpenWeatherError::RequestFailed(err.to_string())
        }
    }
}

#[async_trait]
impl WeatherApiClient for OpenWeatherClient {
    #[instrument(skip(self, params), fields(params = params.len()))]
    async fn fetch(&self, params: &[(String, String)]) -> Result<FetchResponse, OpenWeatherError> {
        let url = self.build_url(params)?;
        debug!(url = %Self::redacted(&url), method = ?self.config.method, "Fetching weather data");

        let request = match self.config.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
        };

        let response = request
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(OpenWeatherError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(OpenWeatherError::ServiceUnavailable(format!(
                "HTTP error! status: {}",
                status.as_u16()
            )));
        }
        if status != StatusCode::OK {
            return Err(OpenWeatherError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| OpenWeatherError::ParseError(e.to_string()))?;

        Ok(FetchResponse::new(
            status.as_u16(),
            status.canonical_reason(),
            data,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn client_with(config: OpenWeatherConfig) -> OpenWeatherClient {
        OpenWeatherClient::new(config).expect("client creation should succeed")
    }

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_client_creation() {
        assert!(OpenWeatherClient::new(OpenWeatherConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = OpenWeatherConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            OpenWeatherClient::new(config),
            Err(OpenWeatherError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_merge_params_defaults_units() {
        let client = client_with(OpenWeatherConfig::default());
        let merged = client.merge_params(&params(&[("q", "London,Uk")]));
        assert_eq!(merged.get("units").map(String::as_str), Some("metric"));
        assert_eq!(merged.get("q").map(String::as_str), Some("London,Uk"));
        assert!(!merged.contains_key("appid"));
    }

    #[test]
    fn test_merge_params_caller_wins() {
        let client = client_with(OpenWeatherConfig::default());
        let merged = client.merge_params(&params(&[("units", "imperial")]));
        assert_eq!(merged.get("units").map(String::as_str), Some("imperial"));
    }

    #[test]
    fn test_build_url_includes_api_key() {
        let config = OpenWeatherConfig {
            api_key: Some(SecretString::from("k3y")),
            ..OpenWeatherConfig::for_testing("http://localhost:1234/forecast")
        };
        let url = client_with(config)
            .build_url(&params(&[("q", "London,Uk")]))
            .unwrap();
        let query: BTreeMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(url.path(), "/forecast");
        assert_eq!(query["q"], "London,Uk");
        assert_eq!(query["units"], "metric");
        assert_eq!(query["appid"], "k3y");
    }

    #[test]
    fn test_build_url_keeps_existing_query() {
        let config = OpenWeatherConfig::for_testing("http://localhost:1234/forecast?cnt=8");
        let url = client_with(config)
            .build_url(&params(&[("q", "Oslo")]))
            .unwrap();
        let query: BTreeMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(query["cnt"], "8");
        assert_eq!(query["q"], "Oslo");
    }

    #[test]
    fn test_build_url_rejects_relative_base() {
        let config = OpenWeatherConfig::for_testing("not a url");
        let err = client_with(config).build_url(&[]).unwrap_err();
        assert!(matches!(err, OpenWeatherError::ConfigurationError(_)));
    }

    #[test]
    fn test_redacted_hides_api_key() {
        let url = Url::parse("http://h/f?q=Oslo&appid=secret").unwrap();
        let shown = OpenWeatherClient::redacted(&url);
        assert!(!shown.contains("secret"));
        assert!(shown.contains("q=Oslo"));
    }
}
