//! Query handlers

use application::{DataSourceService, QueryRequest, QueryResponse};
use axum::{Json, extract::State};
use domain::WeatherQuery;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::{error::ApiError, state::AppState};

/// Run a batch of queries
///
/// Hidden queries and queries without a location are dropped before
/// execution, as a host would.
#[instrument(skip(state, request), fields(targets = request.targets.len()))]
pub async fn query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Json<QueryResponse> {
    let targets: Vec<WeatherQuery> = request
        .targets
        .into_iter()
        .filter(DataSourceService::filter_query)
        .collect();
    debug!(runnable = targets.len(), "Filtered query targets");

    Json(state.datasource.query(&QueryRequest { targets }).await)
}

/// Raw forecast payload for one query's location
pub async fn current_weather(
    State(state): State<AppState>,
    Json(query): Json<WeatherQuery>,
) -> Result<Json<Value>, ApiError> {
    let data = state.datasource.current_weather(&query).await?;
    Ok(Json(data))
}
