//! OpenWeather adapter - Implements WeatherApiPort using integration_openweather

use application::error::{ApplicationError, RequestFailure};
use application::ports::{ApiResponse, WeatherApiPort};
use async_trait::async_trait;
use integration_openweather::{
    OpenWeatherClient, OpenWeatherConfig, OpenWeatherError, WeatherApiClient,
};
use tracing::{debug, instrument};

/// Adapter for the OpenWeatherMap forecast API
pub struct OpenWeatherAdapter {
    client: OpenWeatherClient,
}

impl std::fmt::Debug for OpenWeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherAdapter")
            .field("endpoint", &self.client.config().endpoint())
            .finish()
    }
}

impl OpenWeatherAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn with_config(config: OpenWeatherConfig) -> Result<Self, ApplicationError> {
        let client = OpenWeatherClient::new(config).map_err(|e| match e {
            OpenWeatherError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
            other => ApplicationError::Internal(other.to_string()),
        })?;
        Ok(Self { client })
    }

    /// Normalize an integration error into the request failure shape
    fn map_error(err: &OpenWeatherError) -> RequestFailure {
        RequestFailure::new(err.to_string())
    }
}

#[async_trait]
impl WeatherApiPort for OpenWeatherAdapter {
    #[instrument(skip(self, params), fields(params = params.len()))]
    async fn request(&self, params: &[(String, String)]) -> Result<ApiResponse, RequestFailure> {
        let result = self.client.fetch(params).await;

        match &result {
            Ok(response) => {
                debug!(status = response.status, "Weather API request succeeded");
            },
            Err(e) => {
                debug!(error = %e, "Weather API request failed");
            },
        }

        result
            .map(|r| ApiResponse {
                status: r.status,
                status_text: r.status_text,
                data: r.data,
            })
            .map_err(|e| Self::map_error(&e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_adapter() {
        assert!(OpenWeatherAdapter::with_config(OpenWeatherConfig::default()).is_ok());
    }

    #[test]
    fn invalid_config_is_a_configuration_error() {
        let config = OpenWeatherConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        let err = OpenWeatherAdapter::with_config(config).unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }

    #[test]
    fn debug_shows_endpoint() {
        let adapter =
            OpenWeatherAdapter::with_config(OpenWeatherConfig::for_testing("http://localhost:1"))
                .unwrap();
        let debug_str = format!("{adapter:?}");
        assert!(debug_str.contains("OpenWeatherAdapter"));
        assert!(debug_str.contains("http://localhost:1"));
    }

    #[test]
    fn map_error_http_status() {
        let err = OpenWeatherError::HttpStatus { status: 401 };
        let failure = OpenWeatherAdapter::map_error(&err);
        assert_eq!(failure.status, "error");
        assert_eq!(failure.status_text, "HTTP error! status: 401");
        assert!(failure.data.is_none());
    }

    #[test]
    fn map_error_rate_limited() {
        let failure = OpenWeatherAdapter::map_error(&OpenWeatherError::RateLimitExceeded);
        assert_eq!(
            failure.status_text,
            OpenWeatherError::RateLimitExceeded.to_string()
        );
    }

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OpenWeatherAdapter>();
    }
}
