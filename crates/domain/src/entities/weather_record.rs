//! Forecast records returned by the weather API
//!
//! Each section keeps the fields the API documents and collects any other
//! keys, so that a sub-parameter the catalog does not know yet can still be
//! looked up by name. A documented field holding something other than a
//! number reads as absent.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::value_objects::MainParameter;

/// Temperature, pressure and humidity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MainSection {
    #[serde(default, deserialize_with = "number")]
    pub temp: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub feels_like: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub temp_min: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub temp_max: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub pressure: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub sea_level: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub grnd_level: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub humidity: Option<f64>,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

/// Wind speed, direction and gusts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindSection {
    #[serde(default, deserialize_with = "number")]
    pub speed: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub deg: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub gust: Option<f64>,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

/// Cloud cover percentage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloudsSection {
    #[serde(default, deserialize_with = "number")]
    pub all: Option<f64>,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

/// Precipitation volume
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RainSection {
    #[serde(rename = "3h", default, deserialize_with = "number")]
    pub three_hours: Option<f64>,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

/// Textual condition attached to a record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherCondition {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

/// One sample of a forecast
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// Sample time in Unix seconds
    pub dt: i64,
    #[serde(default)]
    pub main: Option<MainSection>,
    #[serde(default)]
    pub wind: Option<WindSection>,
    #[serde(default)]
    pub clouds: Option<CloudsSection>,
    #[serde(default)]
    pub rain: Option<RainSection>,
    #[serde(default, deserialize_with = "number")]
    pub visibility: Option<f64>,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
}

/// Body of a forecast response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastPayload {
    pub list: Vec<WeatherRecord>,
}

fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(Value::as_f64))
}

fn extra(other: &BTreeMap<String, Value>, name: &str) -> Option<f64> {
    other.get(name).and_then(Value::as_f64)
}

impl WeatherRecord {
    /// Sample time in Unix milliseconds
    #[must_use]
    pub const fn timestamp_ms(&self) -> i64 {
        self.dt.saturating_mul(1000)
    }

    /// Look up a sub-parameter inside a category
    ///
    /// Returns `None` when the section or the field is absent or not numeric.
    #[must_use]
    pub fn value(&self, category: MainParameter, name: &str) -> Option<f64> {
        match category {
            MainParameter::Main => self.main.as_ref().and_then(|s| match name {
                "temp" => s.temp,
                "feels_like" => s.feels_like,
                "temp_min" => s.temp_min,
                "temp_max" => s.temp_max,
                "pressure" => s.pressure,
                "sea_level" => s.sea_level,
                "grnd_level" => s.grnd_level,
                "humidity" => s.humidity,
                _ => extra(&s.other, name),
            }),
            MainParameter::Wind => self.wind.as_ref().and_then(|s| match name {
                "speed" => s.speed,
                "deg" => s.deg,
                "gust" => s.gust,
                _ => extra(&s.other, name),
            }),
            MainParameter::Clouds => self.clouds.as_ref().and_then(|s| match name {
                "all" => s.all,
                _ => extra(&s.other, name),
            }),
            MainParameter::Rain => self.rain.as_ref().and_then(|s| match name {
                "3h" => s.three_hours,
                _ => extra(&s.other, name),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> WeatherRecord {
        serde_json::from_value(json!({
            "dt": 1_700_000_000,
            "main": {
                "temp": 11.2,
                "feels_like": 10.1,
                "temp_min": 9.0,
                "temp_max": 12.5,
                "pressure": 1012,
                "humidity": 81,
                "temp_kf": 0.4
            },
            "wind": { "speed": 4.6, "deg": 230 },
            "clouds": { "all": 75 },
            "rain": { "3h": 0.31 },
            "visibility": 10000,
            "weather": [{ "id": 500, "main": "Rain", "description": "light rain", "icon": "10d" }]
        }))
        .unwrap()
    }

    #[test]
    fn timestamp_is_milliseconds() {
        assert_eq!(sample().timestamp_ms(), 1_700_000_000_000);
    }

    #[test]
    fn looks_up_documented_fields() {
        let r = sample();
        assert_eq!(r.value(MainParameter::Main, "temp"), Some(11.2));
        assert_eq!(r.value(MainParameter::Main, "pressure"), Some(1012.0));
        assert_eq!(r.value(MainParameter::Wind, "deg"), Some(230.0));
        assert_eq!(r.value(MainParameter::Clouds, "all"), Some(75.0));
        assert_eq!(r.value(MainParameter::Rain, "3h"), Some(0.31));
    }

    #[test]
    fn looks_up_undocumented_numeric_fields() {
        assert_eq!(sample().value(MainParameter::Main, "temp_kf"), Some(0.4));
    }

    #[test]
    fn missing_fields_are_none() {
        let r = sample();
        assert_eq!(r.value(MainParameter::Wind, "gust"), None);
        assert_eq!(r.value(MainParameter::Main, "sea_level"), None);
        assert_eq!(r.value(MainParameter::Main, "speed"), None);
    }

    #[test]
    fn missing_section_is_none() {
        let r: WeatherRecord = serde_json::from_value(json!({ "dt": 1 })).unwrap();
        assert_eq!(r.value(MainParameter::Rain, "3h"), None);
        assert!(r.weather.is_empty());
    }

    #[test]
    fn non_numeric_value_reads_as_absent() {
        let payload: ForecastPayload = serde_json::from_value(json!({
            "list": [
                { "dt": 1, "main": { "temp": "n/a", "humidity": 80 }, "visibility": null },
                { "dt": 2, "main": { "temp": 3.5 }, "wind": { "speed": [] } }
            ]
        }))
        .unwrap();

        assert_eq!(payload.list[0].value(MainParameter::Main, "temp"), None);
        assert_eq!(payload.list[0].value(MainParameter::Main, "humidity"), Some(80.0));
        assert_eq!(payload.list[0].visibility, None);
        assert_eq!(payload.list[1].value(MainParameter::Main, "temp"), Some(3.5));
        assert_eq!(payload.list[1].value(MainParameter::Wind, "speed"), None);
    }

    #[test]
    fn payload_requires_list() {
        assert!(serde_json::from_value::<ForecastPayload>(json!({ "cod": "200" })).is_err());
        let payload: ForecastPayload =
            serde_json::from_value(json!({ "list": [{ "dt": 1 }, { "dt": 2 }] })).unwrap();
        assert_eq!(payload.list.len(), 2);
    }
}
