//! Weather data source
//!
//! Runs a batch of queries against the weather API and turns each response
//! into a frame. All requests of a batch run concurrently; a failing query is
//! logged and left out of the result instead of failing the batch.

use std::sync::Arc;

use domain::{
    DataFrame, DataSourceSettings, DEFAULT_LOCATION, ForecastPayload, WeatherQuery, WeatherUnits,
};
use futures::future::join_all;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::frame_builder::{FrameSpec, build_frame};
use crate::error::{ApplicationError, RequestFailure};
use crate::ports::{ApiResponse, WeatherApiPort};

/// Message reported when the connectivity test fails
pub const DEFAULT_ERROR_MESSAGE: &str = "Cannot connect to API";

/// A batch of queries submitted by the host
///
/// Targets are read one by one; a target that does not parse is logged and
/// left out so the rest of the batch still runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryRequest {
    #[serde(default, deserialize_with = "each_target")]
    pub targets: Vec<WeatherQuery>,
}

fn each_target<'de, D>(deserializer: D) -> Result<Vec<WeatherQuery>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(target) => Some(target),
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed query target");
                None
            },
        })
        .collect())
}

/// Frames produced for a batch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResponse {
    pub data: Vec<DataFrame>,
}

/// Outcome of the connectivity test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Success,
    Error,
}

/// Result of the connectivity test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    pub status: TestStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl TestResult {
    /// Whether the data source answered
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == TestStatus::Success
    }
}

/// Query execution against the weather API
pub struct DataSourceService {
    api: Arc<dyn WeatherApiPort>,
    default_units: WeatherUnits,
}

impl std::fmt::Debug for DataSourceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataSourceService")
            .field("default_units", &self.default_units)
            .finish_non_exhaustive()
    }
}

impl DataSourceService {
    /// Create a data source; settings are read once here
    pub fn new(api: Arc<dyn WeatherApiPort>, settings: &DataSourceSettings) -> Self {
        Self {
            api,
            default_units: settings.units(),
        }
    }

    /// The query new panels start with
    #[must_use]
    pub fn default_query() -> WeatherQuery {
        WeatherQuery::default_query()
    }

    /// Whether a host should run the query at all
    #[must_use]
    pub fn filter_query(query: &WeatherQuery) -> bool {
        !query.hide
            && [query.location.as_deref(), query.city_name.as_deref()]
                .into_iter()
                .flatten()
                .any(|s| !s.is_empty())
    }

    /// Run every query concurrently and collect the frames that succeeded
    #[instrument(skip(self, request), fields(targets = request.targets.len()))]
    pub async fn query(&self, request: &QueryRequest) -> QueryResponse {
        let results = join_all(request.targets.iter().map(|t| self.run_target(t))).await;
        let data: Vec<DataFrame> = results.into_iter().flatten().collect();

        debug!(frames = data.len(), "Query batch finished");
        QueryResponse { data }
    }

    async fn run_target(&self, target: &WeatherQuery) -> Option<DataFrame> {
        let Some(location) = target.normalized_location() else {
            debug!(ref_id = %target.ref_id, "Skipping query without location");
            return None;
        };
        let units = target.units.unwrap_or(self.default_units);

        let response = match self
            .request_with_units(&[("q", location.as_str())], units)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(location = %location, error = %e, "Error fetching data");
                return None;
            },
        };

        if response.data.get("list").is_none_or(Value::is_null) {
            debug!(location = %location, "Response has no list");
            return None;
        }

        let payload: ForecastPayload = match serde_json::from_value(response.data) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(location = %location, error = %e, "Malformed forecast");
                return None;
            },
        };

        let parameters = target.selected_parameters();
        Some(build_frame(
            &FrameSpec {
                ref_id: &target.ref_id,
                location: &location,
                main_parameter: target.main_parameter,
                parameters: &parameters,
                units,
            },
            &payload.list,
        ))
    }

    /// Issue a request with the default `units` merged under the given pairs
    ///
    /// # Errors
    ///
    /// Returns the normalized failure of the underlying request.
    pub async fn request(&self, params: &[(&str, &str)]) -> Result<ApiResponse, RequestFailure> {
        self.request_with_units(params, self.default_units).await
    }

    async fn request_with_units(
        &self,
        params: &[(&str, &str)],
        units: WeatherUnits,
    ) -> Result<ApiResponse, RequestFailure> {
        let mut merged = vec![("units".to_string(), units.as_str().to_string())];
        for (name, value) in params {
            merged.retain(|(existing, _)| existing != name);
            merged.push(((*name).to_string(), (*value).to_string()));
        }
        self.api.request(&merged).await
    }

    /// Raw forecast payload for a query's location
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Request` when the request fails.
    pub async fn current_weather(&self, query: &WeatherQuery) -> Result<Value, ApplicationError> {
        let location = query.normalized_location().ok_or_else(|| {
            ApplicationError::Domain(domain::DomainError::InvalidLocation(
                query.raw_location().to_string(),
            ))
        })?;

        self.request(&[("q", location.as_str())])
            .await
            .map(|response| response.data)
            .map_err(|e| {
                ApplicationError::Request(RequestFailure::new(format!(
                    "Failed to fetch current weather: {}",
                    e.status_text
                )))
            })
    }

    /// Issue the sample request and report whether the API answered
    #[instrument(skip(self))]
    pub async fn test_datasource(&self) -> TestResult {
        match self.request(&[("q", DEFAULT_LOCATION)]).await {
            Ok(response) => {
                info!(status = response.status, "Data source test succeeded");
                TestResult {
                    status: TestStatus::Success,
                    message: if response.status_text.is_empty() {
                        "Success".to_string()
                    } else {
                        response.status_text
                    },
                    details: None,
                }
            },
            Err(failure) => {
                warn!(error = %failure, "Data source test failed");
                TestResult {
                    status: TestStatus::Error,
                    message: DEFAULT_ERROR_MESSAGE.to_string(),
                    details: Some(failure.status_text),
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockWeatherApiPort;
    use domain::MainParameter;
    use serde_json::json;

    fn ok(data: Value) -> Result<ApiResponse, RequestFailure> {
        Ok(ApiResponse {
            status: 200,
            status_text: "OK".to_string(),
            data,
        })
    }

    fn forecast(n: i64) -> Value {
        let list: Vec<_> = (0..n)
            .map(|i| json!({ "dt": 1_700_000_000 + i * 10_800, "main": { "temp": i } }))
            .collect();
        json!({ "list": list })
    }

    fn param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn service(mock: MockWeatherApiPort) -> DataSourceService {
        DataSourceService::new(Arc::new(mock), &DataSourceSettings::default())
    }

    fn query(ref_id: &str, city: &str) -> WeatherQuery {
        WeatherQuery {
            ref_id: ref_id.to_string(),
            city_name: Some(city.to_string()),
            main_parameter: Some(MainParameter::Main),
            sub_parameter: Some(vec!["temp".to_string()]),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn query_normalizes_location_in_request() {
        let mut mock = MockWeatherApiPort::new();
        mock.expect_request()
            .withf(|params| {
                param(params, "q") == Some("London,Uk") && param(params, "units") == Some("metric")
            })
            .times(1)
            .returning(|_| ok(forecast(2)));

        let response = service(mock)
            .query(&QueryRequest {
                targets: vec![query("A", "london, UK")],
            })
            .await;

        assert_eq!(response.data.len(), 1);
        assert_eq!(response.data[0].name, "London,Uk - Weather Data");
    }

    #[tokio::test]
    async fn frame_has_one_row_per_record() {
        let mut mock = MockWeatherApiPort::new();
        mock.expect_request().returning(|_| ok(forecast(5)));

        let mut q = query("A", "oslo,no");
        q.sub_parameter = Some(vec!["temp".to_string(), "humidity".to_string()]);

        let response = service(mock)
            .query(&QueryRequest { targets: vec![q] })
            .await;

        let frame = &response.data[0];
        assert_eq!(frame.len(), 5);
        assert!(frame.is_rectangular());
        let humidity = frame.field("humidity").unwrap().values.as_numbers().unwrap();
        assert!(humidity.iter().all(|v| v.is_nan()));
    }

    #[tokio::test]
    async fn failing_query_does_not_fail_batch() {
        let mut mock = MockWeatherApiPort::new();
        mock.expect_request()
            .withf(|params| param(params, "q") == Some("Paris,Fr"))
            .returning(|_| Err(RequestFailure::new("HTTP error! status: 404")));
        mock.expect_request()
            .withf(|params| param(params, "q") == Some("Rome,It"))
            .returning(|_| ok(forecast(3)));

        let response = service(mock)
            .query(&QueryRequest {
                targets: vec![query("A", "paris,fr"), query("B", "rome,it")],
            })
            .await;

        assert_eq!(response.data.len(), 1);
        assert_eq!(response.data[0].ref_id, "B");
        assert_eq!(response.data[0].len(), 3);
    }

    #[tokio::test]
    async fn response_without_list_is_dropped() {
        let mut mock = MockWeatherApiPort::new();
        mock.expect_request()
            .returning(|_| ok(json!({ "cod": "200" })));

        let response = service(mock)
            .query(&QueryRequest {
                targets: vec![query("A", "oslo")],
            })
            .await;
        assert!(response.data.is_empty());
    }

    #[tokio::test]
    async fn malformed_record_drops_query() {
        let mut mock = MockWeatherApiPort::new();
        mock.expect_request()
            .returning(|_| ok(json!({ "list": [{ "main": { "temp": 1 } }] })));

        let response = service(mock)
            .query(&QueryRequest {
                targets: vec![query("A", "oslo")],
            })
            .await;
        assert!(response.data.is_empty());
    }

    #[tokio::test]
    async fn blank_location_issues_no_request() {
        let mut mock = MockWeatherApiPort::new();
        mock.expect_request().never();

        let response = service(mock)
            .query(&QueryRequest {
                targets: vec![query("A", " , ")],
            })
            .await;
        assert!(response.data.is_empty());
    }

    #[tokio::test]
    async fn query_units_override_settings() {
        let mut mock = MockWeatherApiPort::new();
        mock.expect_request()
            .withf(|params| param(params, "units") == Some("imperial"))
            .times(1)
            .returning(|_| ok(forecast(1)));

        let mut q = query("A", "boston,us");
        q.units = Some(WeatherUnits::Imperial);

        let response = service(mock)
            .query(&QueryRequest { targets: vec![q] })
            .await;
        assert_eq!(response.data[0].field("temp").unwrap().config.unit, "°F");
    }

    #[tokio::test]
    async fn settings_units_are_the_default() {
        let mut mock = MockWeatherApiPort::new();
        mock.expect_request()
            .withf(|params| param(params, "units") == Some("standard"))
            .times(1)
            .returning(|_| ok(forecast(1)));

        let mut settings = DataSourceSettings::default();
        settings.json_data.units = Some(WeatherUnits::Standard);
        let svc = DataSourceService::new(Arc::new(mock), &settings);

        let response = svc
            .query(&QueryRequest {
                targets: vec![query("A", "oslo")],
            })
            .await;
        assert_eq!(response.data.len(), 1);
    }

    #[tokio::test]
    async fn default_location_used_when_none_given() {
        let mut mock = MockWeatherApiPort::new();
        mock.expect_request()
            .withf(|params| param(params, "q") == Some("London,Uk"))
            .times(1)
            .returning(|_| ok(forecast(1)));

        let response = service(mock)
            .query(&QueryRequest {
                targets: vec![WeatherQuery::default()],
            })
            .await;
        assert_eq!(response.data.len(), 1);
    }

    #[tokio::test]
    async fn test_datasource_success_reports_status_text() {
        let mut mock = MockWeatherApiPort::new();
        mock.expect_request()
            .withf(|params| param(params, "q") == Some("London,uk"))
            .times(1)
            .returning(|_| ok(json!({ "list": [] })));

        let result = service(mock).test_datasource().await;
        assert!(result.is_success());
        assert_eq!(result.message, "OK");
    }

    #[tokio::test]
    async fn test_datasource_empty_status_text_is_success() {
        let mut mock = MockWeatherApiPort::new();
        mock.expect_request().returning(|_| {
            Ok(ApiResponse {
                status: 200,
                status_text: String::new(),
                data: Value::Null,
            })
        });

        let result = service(mock).test_datasource().await;
        assert_eq!(result.message, "Success");
    }

    #[tokio::test]
    async fn test_datasource_failure_is_generic() {
        let mut mock = MockWeatherApiPort::new();
        mock.expect_request()
            .returning(|_| Err(RequestFailure::new("HTTP error! status: 401")));

        let result = service(mock).test_datasource().await;
        assert_eq!(result.status, TestStatus::Error);
        assert_eq!(result.message, DEFAULT_ERROR_MESSAGE);
        assert_eq!(result.details.as_deref(), Some("HTTP error! status: 401"));
    }

    #[tokio::test]
    async fn current_weather_returns_raw_payload() {
        let mut mock = MockWeatherApiPort::new();
        mock.expect_request().returning(|_| ok(forecast(2)));

        let data = service(mock)
            .current_weather(&query("A", "oslo"))
            .await
            .unwrap();
        assert_eq!(data["list"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn current_weather_wraps_failure() {
        let mut mock = MockWeatherApiPort::new();
        mock.expect_request()
            .returning(|_| Err(RequestFailure::new("timeout")));

        let err = service(mock)
            .current_weather(&query("A", "oslo"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch current weather: timeout");
    }

    #[tokio::test]
    async fn malformed_target_does_not_drop_batch() {
        let request: QueryRequest = serde_json::from_value(json!({
            "targets": [
                { "refId": "A", "cityName": "oslo", "mainParameter": "main" },
                { "refId": 7, "cityName": "rome" },
                { "refId": "C", "cityName": "rome", "mainParameter": "visibility" }
            ]
        }))
        .unwrap();
        assert_eq!(request.targets.len(), 2);

        let mut mock = MockWeatherApiPort::new();
        mock.expect_request().times(2).returning(|_| ok(forecast(2)));

        let response = service(mock).query(&request).await;
        assert_eq!(response.data.len(), 2);

        let unknown = response.data.iter().find(|f| f.ref_id == "C").unwrap();
        let temp = unknown.field("temp").unwrap().values.as_numbers().unwrap();
        assert!(temp.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn filter_query_requires_location() {
        assert!(DataSourceService::filter_query(&WeatherQuery::default_query()));
        assert!(DataSourceService::filter_query(&query("A", "oslo")));
        assert!(!DataSourceService::filter_query(&WeatherQuery::default()));

        let mut hidden = query("A", "oslo");
        hidden.hide = true;
        assert!(!DataSourceService::filter_query(&hidden));
    }

    #[test]
    fn default_query_matches_domain_default() {
        assert_eq!(
            DataSourceService::default_query(),
            WeatherQuery::default_query()
        );
    }
}
