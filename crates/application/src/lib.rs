//! Application layer - Use cases and orchestration
//!
//! Contains the data source service, the form models and the port the
//! weather API adapter implements.

pub mod editors;
pub mod error;
pub mod ports;
pub mod services;

pub use editors::{ConfigEditor, OptionsHost, QueryEditor, QueryHost};
pub use error::{ApplicationError, RequestFailure};
pub use ports::*;
pub use services::*;
