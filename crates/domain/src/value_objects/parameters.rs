//! Weather parameter catalog
//!
//! Main parameters are the top-level sections of a forecast record
//! (`main`, `wind`, `clouds`, `rain`); sub-parameters are the numeric fields
//! inside them. The catalog drives the query editor pickers and the unit
//! annotation of frame fields.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::WeatherUnits;
use crate::errors::DomainError;

/// Sub-parameter selected when nothing else is known
pub const DEFAULT_SUB_PARAMETER: &str = "temp";

/// A labelled option offered by a picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectableValue {
    /// Display label
    pub label: &'static str,
    /// Value stored in the query
    pub value: &'static str,
}

const fn option(label: &'static str, value: &'static str) -> SelectableValue {
    SelectableValue { label, value }
}

const MAIN_OPTIONS: [SelectableValue; 8] = [
    option("Temperature", "temp"),
    option("Feels Like", "feels_like"),
    option("Min Temperature", "temp_min"),
    option("Max Temperature", "temp_max"),
    option("Pressure", "pressure"),
    option("Sea Level", "sea_level"),
    option("Ground Level", "grnd_level"),
    option("Humidity", "humidity"),
];

const WIND_OPTIONS: [SelectableValue; 3] = [
    option("Speed", "speed"),
    option("Direction", "deg"),
    option("Gust", "gust"),
];

const CLOUDS_OPTIONS: [SelectableValue; 1] = [option("Cloudiness", "all")];

const RAIN_OPTIONS: [SelectableValue; 1] = [option("3h Rain Volume", "3h")];

/// Top-level weather category of a forecast record
///
/// # Examples
///
/// ```
/// use domain::value_objects::MainParameter;
///
/// let wind = MainParameter::Wind;
/// assert_eq!(wind.first_sub_parameter(), "speed");
/// assert_eq!(wind.sub_parameter_options().len(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MainParameter {
    /// Temperature, pressure and humidity
    #[default]
    Main,
    /// Wind speed, direction and gusts
    Wind,
    /// Cloud cover
    Clouds,
    /// Precipitation volume
    Rain,
}

impl MainParameter {
    /// All categories in picker order
    pub const ALL: [Self; 4] = [Self::Main, Self::Wind, Self::Clouds, Self::Rain];

    /// Key of the section inside a forecast record
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Wind => "wind",
            Self::Clouds => "clouds",
            Self::Rain => "rain",
        }
    }

    /// Picker label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Main => "Main Weather Data",
            Self::Wind => "Wind",
            Self::Clouds => "Clouds",
            Self::Rain => "Rain",
        }
    }

    /// Sub-parameters offered for this category
    #[must_use]
    pub const fn sub_parameter_options(self) -> &'static [SelectableValue] {
        match self {
            Self::Main => &MAIN_OPTIONS,
            Self::Wind => &WIND_OPTIONS,
            Self::Clouds => &CLOUDS_OPTIONS,
            Self::Rain => &RAIN_OPTIONS,
        }
    }

    /// First option, selected whenever the category changes
    #[must_use]
    pub const fn first_sub_parameter(self) -> &'static str {
        self.sub_parameter_options()[0].value
    }

    /// Catalog label of a sub-parameter, if it belongs to this category
    #[must_use]
    pub fn sub_parameter_label(self, value: &str) -> Option<&'static str> {
        self.sub_parameter_options()
            .iter()
            .find(|opt| opt.value == value)
            .map(|opt| opt.label)
    }
}

impl fmt::Display for MainParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MainParameter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "main" => Ok(Self::Main),
            "wind" => Ok(Self::Wind),
            "clouds" => Ok(Self::Clouds),
            "rain" => Ok(Self::Rain),
            other => Err(DomainError::UnknownParameter(other.to_string())),
        }
    }
}

/// Main category options for the category picker
#[must_use]
pub fn main_parameter_options() -> Vec<SelectableValue> {
    MainParameter::ALL
        .iter()
        .map(|p| option(p.label(), p.as_str()))
        .collect()
}

/// Units options for the units picker
#[must_use]
pub fn units_options() -> Vec<SelectableValue> {
    WeatherUnits::ALL
        .iter()
        .map(|u| option(u.label(), u.as_str()))
        .collect()
}

/// Unit label for a sub-parameter in the given measurement system
///
/// Lookup is case-insensitive. Unknown parameters get an empty unit.
///
/// # Examples
///
/// ```
/// use domain::value_objects::{WeatherUnits, metric_unit};
///
/// assert_eq!(metric_unit("temp", WeatherUnits::Metric), "°C");
/// assert_eq!(metric_unit("Humidity", WeatherUnits::Imperial), "%");
/// assert_eq!(metric_unit("visibility", WeatherUnits::Metric), "");
/// ```
#[must_use]
pub fn metric_unit(parameter: &str, units: WeatherUnits) -> &'static str {
    match parameter.to_lowercase().as_str() {
        "temp" | "feels_like" | "temp_min" | "temp_max" => match units {
            WeatherUnits::Standard => "K",
            WeatherUnits::Metric => "°C",
            WeatherUnits::Imperial => "°F",
        },
        "speed" | "wind_speed" | "gust" => match units {
            WeatherUnits::Imperial => "mph",
            WeatherUnits::Standard | WeatherUnits::Metric => "m/s",
        },
        "pressure" | "sea_level" | "grnd_level" => "hPa",
        "humidity" | "clouds" | "all" => "%",
        "deg" => "°",
        "3h" | "1h" => "mm",
        _ => "",
    }
}
