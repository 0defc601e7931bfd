//! Route table for the dashboard.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::state::AppState;

/// Headroom for multipart boundaries and the `query` field.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Create the dashboard router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.limits.max_upload_bytes + MULTIPART_OVERHEAD;

    Router::new()
        // Screens
        .route("/", get(handlers::index_handler))
        .route("/go", post(handlers::go_handler))
        .route("/home", post(handlers::home_handler))
        .route("/results", get(handlers::results_handler))
        .route(
            "/results/upload",
            post(handlers::upload_handler).layer(DefaultBodyLimit::max(body_limit)),
        )
        // JSON API
        .route("/api/options", get(handlers::options_handler))
        .route("/api/recommendations", get(handlers::recommendations_handler))
        // Health check
        .route("/health", get(handlers::health_handler))
        .route("/ready", get(handlers::ready_handler))
        // Metrics
        .route("/metrics", get(handlers::metrics_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
