//! Location endpoints: batch ingestion, stats and route optimization

use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use geoproc_common::human_time::format_duration;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{self, ApiError, Error};
use crate::models::{BatchRequest, BatchResponse, RouteOptimization, StatsResponse};
use crate::pipeline::partition;
use crate::state::AppState;
use crate::SERVICE_NAME;

/// Placeholder score returned by the optimize endpoint
const OPTIMIZATION_SCORE: f64 = 0.92;
/// Placeholder savings returned by the optimize endpoint
const ESTIMATED_SAVINGS: f64 = 15.5;

/// POST /api/location/batch
///
/// Validates the batch, fans it out over the worker pool and adds its size
/// to the processed counter. Rejected batches leave the counter untouched.
///
/// The body is parsed as JSON whatever its `Content-Type`. Once accepted, a
/// batch runs on its own task and is counted even if the client goes away.
pub async fn process_batch(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<BatchResponse>, ApiError> {
    let request: BatchRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid batch body: {}", e)))?;

    let batch_len = request.locations.len();
    check_batch_size(batch_len, state.config.max_batch_size)?;

    let batch_id = Uuid::new_v4();
    let plan = partition(batch_len);
    info!(
        batch_id = %batch_id,
        locations = batch_len,
        workers = plan.worker_count,
        chunk_size = plan.chunk_size,
        "Processing location batch"
    );

    let batch = state.clone();
    let results = tokio::spawn(async move {
        let results = batch.dispatcher.dispatch(request.locations, &plan).await?;
        batch.counters.add_processed(batch_len as i64).await;
        Ok::<_, Error>(results)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Batch {} failed: {}", batch_id, e)))??;

    Ok(Json(BatchResponse {
        processed: batch_len,
        results,
        timestamp: geoproc_common::time::unix_now(),
    }))
}

fn check_batch_size(len: usize, max: usize) -> error::Result<()> {
    if len > max {
        warn!("Rejected batch of {} locations (max {})", len, max);
        return Err(Error::BadRequest(format!(
            "Batch size exceeds maximum of {}",
            max
        )));
    }
    Ok(())
}

/// GET /api/location/stats
pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let pool = state.worker_pool();

    Json(StatsResponse {
        processed_locations: state.counters.processed().await,
        uptime: format_duration(state.uptime()),
        service: SERVICE_NAME.to_string(),
        active_workers: pool.active(),
        max_workers: pool.capacity(),
    })
}

#[derive(Debug, Deserialize)]
pub struct OptimizeQuery {
    user_id: Option<String>,
}

/// GET /api/location/optimize?user_id=...
///
/// No optimization is computed; the response is a fixed placeholder.
pub async fn optimize_route(
    Query(query): Query<OptimizeQuery>,
) -> Result<Json<RouteOptimization>, ApiError> {
    let user_id = query
        .user_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::BadRequest("user_id required".to_string()))?;

    Ok(Json(RouteOptimization {
        user_id,
        optimization_score: OPTIMIZATION_SCORE,
        estimated_savings: ESTIMATED_SAVINGS,
        route_points: Vec::new(),
    }))
}
