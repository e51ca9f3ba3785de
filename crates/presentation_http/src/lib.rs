//! WeatherFrame HTTP presentation layer
//!
//! This crate exposes the weather data source over HTTP.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
