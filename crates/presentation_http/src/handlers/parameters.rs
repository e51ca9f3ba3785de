//! Query editor catalog handlers

use std::collections::BTreeMap;

use axum::Json;
use domain::{MainParameter, SelectableValue, WeatherQuery, main_parameter_options, units_options};
use serde::Serialize;

/// Options offered by the query editor pickers
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterCatalog {
    /// Category picker
    pub main_parameters: Vec<SelectableValue>,
    /// Field picker, per category
    pub sub_parameters: BTreeMap<&'static str, &'static [SelectableValue]>,
    /// Units picker
    pub units: Vec<SelectableValue>,
}

impl ParameterCatalog {
    /// Build the static catalog
    #[must_use]
    pub fn new() -> Self {
        Self {
            main_parameters: main_parameter_options(),
            sub_parameters: MainParameter::ALL
                .iter()
                .map(|p| (p.as_str(), p.sub_parameter_options()))
                .collect(),
            units: units_options(),
        }
    }
}

impl Default for ParameterCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Picker options
pub async fn catalog() -> Json<ParameterCatalog> {
    Json(ParameterCatalog::new())
}

/// Query new panels start with
pub async fn default_query() -> Json<WeatherQuery> {
    Json(WeatherQuery::default_query())
}
