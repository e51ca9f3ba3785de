//! Query form model
//!
//! Every edit is emitted to the host. Selection edits run the query right
//! away; typing a city name runs it after [`CITY_NAME_DEBOUNCE`], and a newer
//! keystroke replaces the pending run.

use std::sync::Arc;
use std::time::Duration;

use domain::{DEFAULT_SUB_PARAMETER, MainParameter, SelectableValue, WeatherQuery, WeatherUnits};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

use super::QueryHost;

/// Delay between the last city name edit and the query run
pub const CITY_NAME_DEBOUNCE: Duration = Duration::from_millis(500);

/// A selected sub-parameter as the multi-select shows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedOption {
    /// Display label, the raw value when the catalog does not know it
    pub label: String,
    /// Raw value
    pub value: String,
}

/// Edits one query and drives the host
pub struct QueryEditor {
    query: WeatherQuery,
    host: Arc<dyn QueryHost>,
    debounce: Duration,
    pending_run: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for QueryEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEditor")
            .field("query", &self.query)
            .field("debounce", &self.debounce)
            .field("run_pending", &self.has_pending_run())
            .finish_non_exhaustive()
    }
}

impl QueryEditor {
    /// Open the form on a query
    pub fn new(query: WeatherQuery, host: Arc<dyn QueryHost>) -> Self {
        Self {
            query,
            host,
            debounce: CITY_NAME_DEBOUNCE,
            pending_run: None,
        }
    }

    /// Override the city name debounce
    #[must_use]
    pub const fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Query being edited
    #[must_use]
    pub const fn query(&self) -> &WeatherQuery {
        &self.query
    }

    /// Whether a debounced run has not fired yet
    #[must_use]
    pub fn has_pending_run(&self) -> bool {
        self.pending_run.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Text shown in the city name input
    #[must_use]
    pub fn city_name_value(&self) -> &str {
        [self.query.city_name.as_deref(), self.query.location.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or_default()
    }

    /// Category shown in the main parameter select
    #[must_use]
    pub fn main_parameter(&self) -> MainParameter {
        self.query.main_parameter.unwrap_or_default()
    }

    /// Units shown in the units select
    #[must_use]
    pub fn units_value(&self) -> WeatherUnits {
        self.query.units.unwrap_or_default()
    }

    /// Options of the multi-select for the current category
    #[must_use]
    pub fn sub_parameter_options(&self) -> &'static [SelectableValue] {
        self.main_parameter().sub_parameter_options()
    }

    /// Current multi-select value
    #[must_use]
    pub fn selected_sub_parameters(&self) -> Vec<SelectedOption> {
        let category = self.main_parameter();
        self.query
            .sub_parameter
            .iter()
            .flatten()
            .map(|value| SelectedOption {
                label: category
                    .sub_parameter_label(value)
                    .map_or_else(|| value.clone(), ToString::to_string),
                value: value.clone(),
            })
            .collect()
    }

    /// City name typed
    ///
    /// Sets city name, location and free text to the same value, then
    /// schedules a debounced run.
    pub fn on_city_name_change(&mut self, value: &str) {
        self.query.city_name = Some(value.to_string());
        self.query.location = Some(value.to_string());
        self.query.query_text = Some(value.to_string());
        self.host.on_change(self.query.clone());
        self.schedule_run();
    }

    /// Category selected
    ///
    /// Resets the sub-parameters to the first option of the new category.
    pub fn on_main_parameter_change(&mut self, value: Option<MainParameter>) {
        let sub = value.map_or(DEFAULT_SUB_PARAMETER, MainParameter::first_sub_parameter);
        self.query.main_parameter = value;
        self.query.sub_parameter = Some(vec![sub.to_string()]);
        self.query.metric = Some(vec![sub.to_string()]);
        self.host.on_change(self.query.clone());
        self.run_now();
    }

    /// Sub-parameters selected
    pub fn on_sub_parameter_change(&mut self, values: Vec<String>) {
        self.query.metric = Some(values.clone());
        self.query.sub_parameter = Some(values);
        self.host.on_change(self.query.clone());
        self.run_now();
    }

    /// Units selected
    pub fn on_units_change(&mut self, units: WeatherUnits) {
        self.query.units = Some(units);
        self.host.on_change(self.query.clone());
        self.run_now();
    }

    fn run_now(&mut self) {
        self.cancel_pending();
        self.host.on_run_query();
    }

    fn schedule_run(&mut self) {
        self.cancel_pending();

        let Ok(handle) = Handle::try_current() else {
            debug!("No runtime for debounced run, running immediately");
            self.host.on_run_query();
            return;
        };

        let host = Arc::clone(&self.host);
        let debounce = self.debounce;
        self.pending_run = Some(handle.spawn(async move {
            tokio::time::sleep(debounce).await;
            host.on_run_query();
        }));
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending_run.take() {
            pending.abort();
        }
    }
}

impl Drop for QueryEditor {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
