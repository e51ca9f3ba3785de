//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod openweather_adapter;

pub use openweather_adapter::OpenWeatherAdapter;
