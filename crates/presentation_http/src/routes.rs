//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Liveness
        .route("/health", get(handlers::health::health_check))
        // Data source API
        .route("/api/health", get(handlers::health::datasource_check))
        .route("/api/query", post(handlers::query::query))
        .route(
            "/api/current-weather",
            post(handlers::query::current_weather),
        )
        // Query editor catalog
        .route("/api/parameters", get(handlers::parameters::catalog))
        .route(
            "/api/default-query",
            get(handlers::parameters::default_query),
        )
        // Attach state
        .with_state(state)
}
