//! Health check and Prometheus metrics endpoints

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use pulse::HealthReport;
use serde::Serialize;

use super::AppState;

/// Health report enriched with server details.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    #[serde(flatten)]
    pub report: HealthReport,
    /// Server version
    pub version: &'static str,
    /// Server uptime in seconds
    pub uptime_secs: u64,
    pub cache_ttl_secs: u64,
    pub max_workers: usize,
    pub timeout_secs: u64,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
}

/// GET /api/health
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let report = state.pulse.health().await;
    let cfg = state.pulse.config();
    let response = HealthResponse {
        report,
        version: crate::VERSION,
        uptime_secs: state.start_time.elapsed().as_secs(),
        cache_ttl_secs: cfg.cache_ttl.as_secs(),
        max_workers: cfg.max_workers,
        timeout_secs: cfg.provider_timeout.as_secs(),
    };

    (StatusCode::OK, Json(response))
}

/// GET /metrics - Prometheus text exposition
async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let body = state.metrics.as_ref().map(|h| h.render()).unwrap_or_default();
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
}
