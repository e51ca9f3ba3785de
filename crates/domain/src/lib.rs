//! Domain layer for WeatherFrame
//!
//! Settings, queries, forecast records and the frames they become.
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
