//! US index summary, formatted for display.

use std::time::Instant;

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use pulse::Quote;
use serde::Serialize;

use super::{AppState, Envelope};
use crate::metrics::record_request;

/// Display name and ticker of each tracked index.
pub const US_INDICES: [(&str, &str); 3] = [
    ("S&P 500", "^GSPC"),
    ("NASDAQ", "^IXIC"),
    ("DOW", "^DJI"),
];

/// One index row: `value` like `"4,567.89"`, `change` like `"+12.34"`,
/// `percent` like `"+0.27%"`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IndexSummary {
    pub name: &'static str,
    pub value: String,
    pub change: String,
    pub percent: String,
    /// `"up"` or `"down"`, from the sign of the percent change.
    pub trend: &'static str,
}

/// Indices grouped by region.
#[derive(Debug, Serialize)]
pub struct IndicesByRegion {
    #[serde(rename = "US")]
    pub us: Vec<IndexSummary>,
}

impl IndexSummary {
    fn from_quote(name: &'static str, q: &Quote) -> Self {
        Self {
            name,
            value: with_thousands(q.price),
            change: format!("{:+.2}", q.change),
            percent: format!("{:+.2}%", q.change_percent),
            trend: if q.change_percent >= 0.0 { "up" } else { "down" },
        }
    }
}

/// `1234567.891` -> `"1,234,567.89"`.
fn with_thousands(v: f64) -> String {
    let fixed = format!("{:.2}", v.abs());
    let (int, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(fixed.len() + int.len() / 3 + 1);
    if v < 0.0 {
        grouped.push('-');
    }
    for (i, d) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(d);
    }
    grouped.push('.');
    grouped.push_str(frac);
    grouped
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/indices", get(indices_handler))
}

/// GET /api/indices
async fn indices_handler(State(state): State<AppState>) -> impl IntoResponse {
    let started = Instant::now();
    let symbols: Vec<&str> = US_INDICES.iter().map(|&(_, s)| s).collect();
    let quotes = state.pulse.resolve_many(&symbols).await;

    let us: Vec<IndexSummary> = US_INDICES
        .iter()
        .filter_map(|&(name, sym)| quotes.get(sym).map(|q| IndexSummary::from_quote(name, q)))
        .collect();

    record_request("GET", "/api/indices", true, started.elapsed());
    Envelope::ok(IndicesByRegion { us })
}
