//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use geoproc_common::api::HealthResponse;
use geoproc_common::human_time::format_duration;

use crate::state::AppState;
use crate::SERVICE_NAME;

/// GET /health
///
/// Static service identity plus uptime since start.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(
        SERVICE_NAME,
        env!("CARGO_PKG_VERSION"),
        format_duration(state.uptime()),
    ))
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
