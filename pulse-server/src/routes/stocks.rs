//! Quote endpoints

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    response::IntoResponse,
    routing::{get, post},
};
use pulse::normalize_symbol;
use serde::Deserialize;

use super::{ApiError, AppState, Envelope};
use crate::metrics::record_request;

/// Body of `POST /api/stocks`.
#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub symbols: Vec<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/stock/{symbol}", get(stock_handler))
        .route("/api/stocks", post(stocks_handler))
}

/// GET /api/stock/{symbol} - resolve one quote
async fn stock_handler(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let started = Instant::now();
    if normalize_symbol(&symbol).is_empty() {
        record_request("GET", "/api/stock", false, started.elapsed());
        return Err(ApiError::bad_request("symbol must not be empty"));
    }

    let quote = state.pulse.resolve(&symbol).await;
    record_request("GET", "/api/stock", true, started.elapsed());
    Ok(Envelope::ok(quote))
}

/// POST /api/stocks - resolve a batch; every requested symbol gets a quote
async fn stocks_handler(
    State(state): State<AppState>,
    body: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let started = Instant::now();
    let symbols = match body {
        Ok(Json(req)) => req.symbols,
        Err(rejection) => {
            record_request("POST", "/api/stocks", false, started.elapsed());
            return Err(ApiError::bad_request(rejection.body_text()));
        }
    };

    let symbols: Vec<String> = symbols
        .into_iter()
        .filter(|s| !normalize_symbol(s).is_empty())
        .collect();
    if symbols.is_empty() {
        record_request("POST", "/api/stocks", false, started.elapsed());
        return Err(ApiError::bad_request("symbols must be a non-empty list"));
    }

    tracing::info!(count = symbols.len(), "batch quote request");
    let quotes = state.pulse.resolve_many(&symbols).await;
    record_request("POST", "/api/stocks", true, started.elapsed());
    Ok(Envelope::ok(quotes))
}
