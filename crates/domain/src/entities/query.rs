//! Weather query
//!
//! One target of a query request, as edited by the query form.

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::value_objects::{
    DEFAULT_LOCATION, DEFAULT_SUB_PARAMETER, Location, MainParameter, WeatherUnits,
};

/// A single weather query
///
/// `sub_parameter` and `metric` accept either a single string or a list on
/// input and are always serialized as lists. An unrecognized
/// `main_parameter` or `units` reads as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherQuery {
    /// Identifier the host uses to match frames to queries
    #[serde(default)]
    pub ref_id: String,

    /// Location as stored by older queries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// City name typed in the query form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_name: Option<String>,

    /// Selected category
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub main_parameter: Option<MainParameter>,

    /// Selected fields within the category; `None` means "not chosen yet"
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Option::is_none"
    )]
    pub sub_parameter: Option<Vec<String>>,

    /// Mirror of `sub_parameter` kept for hosts that read `metric`
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Option::is_none"
    )]
    pub metric: Option<Vec<String>>,

    /// Measurement system for this query
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub units: Option<WeatherUnits>,

    /// Free text mirror of the city name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_text: Option<String>,

    /// Hidden queries are not executed
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hide: bool,
}

impl WeatherQuery {
    /// The query every new panel starts with
    #[must_use]
    pub fn default_query() -> Self {
        Self {
            location: Some(DEFAULT_LOCATION.to_string()),
            main_parameter: Some(MainParameter::Main),
            sub_parameter: Some(vec![DEFAULT_SUB_PARAMETER.to_string()]),
            metric: Some(vec![DEFAULT_SUB_PARAMETER.to_string()]),
            units: Some(WeatherUnits::Metric),
            ..Default::default()
        }
    }

    /// Raw location text: city name first, then location, then the default
    #[must_use]
    pub fn raw_location(&self) -> &str {
        [self.city_name.as_deref(), self.location.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or(DEFAULT_LOCATION)
    }

    /// Normalized location, or `None` when it normalizes to nothing
    #[must_use]
    pub fn normalized_location(&self) -> Option<Location> {
        Location::parse(self.raw_location()).ok()
    }

    /// Sub-parameters to turn into frame fields
    ///
    /// Falls back to the default field when none has been chosen.
    #[must_use]
    pub fn selected_parameters(&self) -> Vec<String> {
        self.sub_parameter
            .clone()
            .unwrap_or_else(|| vec![DEFAULT_SUB_PARAMETER.to_string()])
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<OneOrMany>::deserialize(deserializer)?.map(|value| match value {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }),
    )
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .and_then(|value| serde_json::from_value(value).ok()))
}
