//! Units system value object
//!
//! The weather API accepts three measurement systems through its `units`
//! query parameter.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Measurement system requested from the weather API
///
/// # Examples
///
/// ```
/// use domain::value_objects::WeatherUnits;
///
/// let units: WeatherUnits = "Imperial".parse().expect("valid units");
/// assert_eq!(units, WeatherUnits::Imperial);
/// assert_eq!(units.as_str(), "imperial");
/// assert_eq!(WeatherUnits::default(), WeatherUnits::Metric);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherUnits {
    /// Kelvin, metres per second
    Standard,
    /// Celsius, metres per second
    #[default]
    Metric,
    /// Fahrenheit, miles per hour
    Imperial,
}

impl WeatherUnits {
    /// All unit systems in display order
    pub const ALL: [Self; 3] = [Self::Standard, Self::Metric, Self::Imperial];

    /// Value sent in the `units` query parameter
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }

    /// Human-readable label for pickers
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Metric => "Metric",
            Self::Imperial => "Imperial",
        }
    }
}

impl fmt::Display for WeatherUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WeatherUnits {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "metric" => Ok(Self::Metric),
            "imperial" => Ok(Self::Imperial),
            other => Err(DomainError::InvalidUnits(other.to_string())),
        }
    }
}
