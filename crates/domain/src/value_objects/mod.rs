//! Value Objects - Immutable, identity-less domain primitives

mod location;
mod parameters;
mod units;

pub use location::{DEFAULT_LOCATION, Location, normalize as normalize_location};
pub use parameters::{
    DEFAULT_SUB_PARAMETER, MainParameter, SelectableValue, main_parameter_options, metric_unit,
    units_options,
};
pub use units::WeatherUnits;
