//! Editor models
//!
//! Headless state behind the configuration form and the query form. Each
//! editor owns the value being edited and reports every change to its host,
//! the component that persists options or runs queries.

mod config_editor;
mod query_editor;

#[cfg(test)]
use mockall::automock;

use domain::{DataSourceSettings, WeatherQuery};

pub use config_editor::{ConfigEditor, validate_url};
pub use query_editor::{CITY_NAME_DEBOUNCE, QueryEditor, SelectedOption};

/// Receives options emitted by the configuration form
#[cfg_attr(test, automock)]
pub trait OptionsHost: Send + Sync {
    /// Options changed
    fn on_options_change(&self, options: DataSourceSettings);
}

/// Receives queries emitted by the query form
#[cfg_attr(test, automock)]
pub trait QueryHost: Send + Sync {
    /// Query changed
    fn on_change(&self, query: WeatherQuery);

    /// Query should be executed
    fn on_run_query(&self);
}
