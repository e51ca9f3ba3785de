//! Location value object
//!
//! A city query in the `City,CountryCode` form understood by the weather API.
//! Normalization trims each comma-separated segment and capitalizes it, so
//! `"london, UK"` becomes `"London,Uk"`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Location used when a query names none
pub const DEFAULT_LOCATION: &str = "London,uk";

/// A normalized, non-empty location string
///
/// # Examples
///
/// ```
/// use domain::value_objects::Location;
///
/// let loc = Location::parse("london, UK").expect("non-empty");
/// assert_eq!(loc.as_str(), "London,Uk");
///
/// assert!(Location::parse("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Location(String);

impl Location {
    /// Normalize and validate a raw location string
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidLocation` when every segment is blank.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let normalized = normalize(raw);
        if normalized.split(',').all(str::is_empty) {
            return Err(DomainError::InvalidLocation(raw.to_string()));
        }
        Ok(Self(normalized))
    }

    /// The normalized location
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Trim and capitalize every comma-separated segment
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.split(',')
        .map(|part| capitalize(part.trim()))
        .collect::<Vec<_>>()
        .join(",")
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

impl Default for Location {
    fn default() -> Self {
        Self(normalize(DEFAULT_LOCATION))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Location {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self {
        location.0
    }
}

impl AsRef<str> for Location {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
