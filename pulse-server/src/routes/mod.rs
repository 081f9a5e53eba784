//! Route modules for the quote server
//!
//! - stocks: single and batch quote endpoints
//! - indices: US index summary
//! - health: health check and Prometheus metrics

pub mod health;
pub mod indices;
pub mod stocks;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use metrics_exporter_prometheus::PrometheusHandle;
use pulse::Pulse;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Quote resolution engine
    pub pulse: Arc<Pulse>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Prometheus handle; `None` when no recorder is installed
    pub metrics: Option<PrometheusHandle>,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(
        pulse: Arc<Pulse>,
        config: Arc<ServerConfig>,
        metrics: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            pulse,
            config,
            metrics,
            start_time: std::time::Instant::now(),
        }
    }
}

/// Successful response envelope.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// Error response envelope.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "success": false, "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            HeaderName::from_static("x-requested-with"),
        ])
}

/// Build the main application router by merging all route modules
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .merge(stocks::routes())
        .merge(indices::routes())
        .merge(health::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
