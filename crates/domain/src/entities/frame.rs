//! Data frames
//!
//! Column-oriented time series handed to the host renderer. A frame holds a
//! time field followed by numeric fields; all fields have the same length.

use serde::{Deserialize, Serialize};

/// Kind of values a field carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Unix milliseconds
    Time,
    /// Floating point measurements
    Number,
}

/// Display configuration of a field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Unit label, empty when unknown
    #[serde(default)]
    pub unit: String,
}

/// Column values
///
/// Missing measurements are stored as `f64::NAN`, which serializes as JSON
/// `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValues {
    Time(Vec<i64>),
    Number(Vec<f64>),
}

impl FieldValues {
    /// Number of entries in the column
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Time(v) => v.len(),
            Self::Number(v) => v.len(),
        }
    }

    /// Whether the column is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Numeric values, if this is a number column
    #[must_use]
    pub fn as_numbers(&self) -> Option<&[f64]> {
        match self {
            Self::Number(v) => Some(v),
            Self::Time(_) => None,
        }
    }

    /// Timestamps, if this is a time column
    #[must_use]
    pub fn as_times(&self) -> Option<&[i64]> {
        match self {
            Self::Time(v) => Some(v),
            Self::Number(_) => None,
        }
    }
}

/// One column of a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub values: FieldValues,
    #[serde(default)]
    pub config: FieldConfig,
}

impl Field {
    /// A time column named `Time`
    #[must_use]
    pub fn time(values: Vec<i64>) -> Self {
        Self {
            name: "Time".to_string(),
            field_type: FieldType::Time,
            values: FieldValues::Time(values),
            config: FieldConfig::default(),
        }
    }

    /// A numeric column with a unit annotation
    #[must_use]
    pub fn number(name: impl Into<String>, values: Vec<f64>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Number,
            values: FieldValues::Number(values),
            config: FieldConfig { unit: unit.into() },
        }
    }
}

/// A named time series produced for one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFrame {
    pub ref_id: String,
    pub name: String,
    pub fields: Vec<Field>,
}

impl DataFrame {
    /// Number of rows, taken from the first field
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.first().map_or(0, |f| f.values.len())
    }

    /// Whether the frame has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether every field has the same number of rows
    #[must_use]
    pub fn is_rectangular(&self) -> bool {
        let rows = self.len();
        self.fields.iter().all(|f| f.values.len() == rows)
    }

    /// Find a field by name
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}
