//! geoproc-lp library - Location Processor
//!
//! Ingests batches of geolocation samples, fans each batch out across a
//! bounded worker pool, writes every sample through to a key-value store on
//! a best-effort basis and reports aggregate throughput.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod state;
pub mod store;

pub use state::AppState;

/// Service identity reported by health and stats
pub const SERVICE_NAME: &str = "location-processor";

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Batch size is bounded by sample count, not bytes
        .route(
            "/api/location/batch",
            post(api::process_batch).layer(DefaultBodyLimit::disable()),
        )
        .route("/api/location/stats", get(api::get_stats))
        .route("/api/location/optimize", get(api::optimize_route))
        .merge(api::health_routes())
        .with_state(state)
        .layer(middleware::from_fn(api::cors_middleware))
        .layer(TraceLayer::new_for_http())
}
