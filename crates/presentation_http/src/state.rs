//! Application state shared across handlers

use std::sync::Arc;

use application::DataSourceService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Weather data source
    pub datasource: Arc<DataSourceService>,
}
