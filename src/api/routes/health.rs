//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (ready to serve traffic)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Kubernetes readiness probe.
/// Returns 200 if the data directory is listable.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    match state.store.labels() {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// GET /health
///
/// Full health status with data directory details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let labels = state.store.labels();

    let (status, snapshots) = match &labels {
        Ok(labels) => ("healthy", labels.len()),
        Err(_) => ("unhealthy", 0),
    };

    Json(HealthResponse {
        status: status.to_string(),
        data_dir: state.store.data_dir().display().to_string(),
        snapshots,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
