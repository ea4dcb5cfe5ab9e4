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
/// Templates are compiled before the router exists, and a cold pulse cache
/// fills on first request, so a running server is ready.
pub async fn readiness() -> StatusCode {
    StatusCode::OK
}

/// GET /health
///
/// Full health status. A cold pulse cache reports "degraded": the first pulse
/// request will block on upstream.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let warm = state.pulse.is_warm().await;

    Json(HealthResponse {
        status: if warm { "healthy" } else { "degraded" }.to_string(),
        pulse: if warm { "warm" } else { "cold" }.to_string(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
