use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status snapshot of the engine, independent of provider reachability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// `"healthy"` when the cache backend answers, `"degraded"` otherwise.
    pub status: String,
    /// Name of the cache backend (e.g. `"memory"`).
    pub cache_backend: String,
    /// Whether the cache backend answered.
    pub cache_reachable: bool,
    /// Number of live cache entries.
    pub cache_size: u64,
    /// Registered connectors in priority order.
    pub providers: Vec<String>,
    /// When the report was produced.
    pub timestamp: DateTime<Utc>,
}
