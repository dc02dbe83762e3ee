//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Snapshot metadata
        .route("/dataset", get(handlers::dataset_info))
        .route("/dataset/refresh", post(handlers::refresh_dataset))
        // Chart endpoints
        .route("/chart", get(handlers::get_chart))
        .route("/chart/export", get(handlers::export_chart))
        .route("/peaks", get(handlers::get_peaks))
        // Statistics endpoints
        .route("/summary", get(handlers::get_summary))
        .route("/lookup", get(handlers::lookup_value))
        .route("/top-guesses", get(handlers::get_top_guesses));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::feed::{DatasetCache, GuessFeed, StaticGuessFeed};

    #[test]
    fn test_router_creation() {
        let feed = Arc::new(StaticGuessFeed::new(Vec::new())) as Arc<dyn GuessFeed>;
        let cache = Arc::new(DatasetCache::new(feed, Duration::from_secs(300)));
        let state = AppState::new(cache);
        let _router = create_router(state);
        // If we got here, router was created successfully
    }
}
