//! Forecast to frame transformation
//!
//! Turns the records of one forecast response into a frame with a `Time`
//! column and one numeric column per selected sub-parameter.

use domain::{
    DataFrame, Field, Location, MainParameter, WeatherRecord, WeatherUnits, metric_unit,
};

/// Parameters of one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameSpec<'a> {
    /// Query identifier copied onto the frame
    pub ref_id: &'a str,
    /// Normalized location, used in the frame name
    pub location: &'a Location,
    /// Section the sub-parameters are read from; `None` yields NaN columns
    pub main_parameter: Option<MainParameter>,
    /// Fields to extract, one column each
    pub parameters: &'a [String],
    /// Measurement system, for unit labels
    pub units: WeatherUnits,
}

/// Frame name shown by the host
#[must_use]
pub fn frame_name(location: &Location) -> String {
    format!("{location} - Weather Data")
}

/// Build a frame from forecast records
///
/// Every column has exactly one entry per record. A value that is missing
/// from its record becomes `f64::NAN`.
#[must_use]
pub fn build_frame(spec: &FrameSpec<'_>, records: &[WeatherRecord]) -> DataFrame {
    let times = records.iter().map(WeatherRecord::timestamp_ms).collect();

    let value_fields = spec.parameters.iter().map(|param| {
        let values = records
            .iter()
            .map(|record| {
                spec.main_parameter
                    .and_then(|category| record.value(category, param))
                    .unwrap_or(f64::NAN)
            })
            .collect();
        Field::number(param.clone(), values, metric_unit(param, spec.units))
    });

    DataFrame {
        ref_id: spec.ref_id.to_string(),
        name: frame_name(spec.location),
        fields: std::iter::once(Field::time(times))
            .chain(value_fields)
            .collect(),
    }
}
