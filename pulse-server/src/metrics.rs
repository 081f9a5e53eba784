//! Prometheus metrics for quote resolution and HTTP requests.

use std::time::Duration;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use pulse::{AttemptOutcome, Capability, ResolutionObserver};

pub const REQUESTS_TOTAL: &str = "stock_data_requests_total";
pub const REQUEST_DURATION: &str = "stock_data_request_duration_seconds";
pub const API_CALLS_TOTAL: &str = "stock_data_api_calls_total";
pub const API_CALL_DURATION: &str = "stock_data_api_call_duration_seconds";
pub const CACHE_LOOKUPS_TOTAL: &str = "stock_data_cache_lookups_total";
pub const SYNTHETIC_TOTAL: &str = "stock_data_synthetic_quotes_total";

/// Install the process-wide Prometheus recorder.
///
/// Only one recorder may be installed per process; the binary calls this once
/// at startup.
pub fn install_recorder() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    Ok(handle)
}

/// Count one HTTP request against `endpoint`.
pub fn record_request(method: &'static str, endpoint: &'static str, ok: bool, elapsed: Duration) {
    let status = if ok { "success" } else { "error" };
    counter!(REQUESTS_TOTAL, "method" => method, "endpoint" => endpoint, "status" => status)
        .increment(1);
    histogram!(REQUEST_DURATION, "endpoint" => endpoint).record(elapsed.as_secs_f64());
}

/// Forwards engine events to the installed `metrics` recorder.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricsObserver;

impl ResolutionObserver for MetricsObserver {
    fn cache_hit(&self, _symbol: &str) {
        counter!(CACHE_LOOKUPS_TOTAL, "result" => "hit").increment(1);
    }

    fn cache_miss(&self, _symbol: &str) {
        counter!(CACHE_LOOKUPS_TOTAL, "result" => "miss").increment(1);
    }

    fn provider_attempt(
        &self,
        connector: &str,
        capability: Capability,
        outcome: AttemptOutcome,
        elapsed: Duration,
    ) {
        let provider = connector.to_string();
        counter!(
            API_CALLS_TOTAL,
            "provider" => provider.clone(),
            "capability" => capability.as_str(),
            "status" => outcome.as_str()
        )
        .increment(1);
        histogram!(API_CALL_DURATION, "provider" => provider).record(elapsed.as_secs_f64());
    }

    fn synthesized(&self, _symbol: &str) {
        counter!(SYNTHETIC_TOTAL).increment(1);
    }
}
