//! OpenWeatherMap forecast integration
//!
//! Client for the OpenWeatherMap 5-day/3-hour forecast API
//! (<https://openweathermap.org/forecast5>). The API answers
//! `GET {endpoint}?q=<City,CountryCode>&units=<units>&appid=<key>` with a JSON
//! object whose `list` holds one record per three-hour step.
//!
//! [`WeatherApiClient`] defines the interface, implemented by
//! [`OpenWeatherClient`].
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_openweather::{OpenWeatherClient, OpenWeatherConfig, WeatherApiClient};
//!
//! let client = OpenWeatherClient::new(OpenWeatherConfig::default())?;
//! let response = client
//!     .fetch(&[("q".to_string(), "London,Uk".to_string())])
//!     .await?;
//! let records = &response.data["list"];
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{OpenWeatherClient, WeatherApiClient};
pub use config::{HttpMethod, OpenWeatherConfig};
pub use error::OpenWeatherError;
pub use models::FetchResponse;
