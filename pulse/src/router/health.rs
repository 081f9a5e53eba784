use chrono::Utc;
use pulse_core::HealthReport;

use crate::Pulse;

impl Pulse {
    /// Status snapshot: cache backend state and the registered provider chain.
    ///
    /// Providers are listed, not contacted.
    pub async fn health(&self) -> HealthReport {
        let reachable = match self.cache.health().await {
            Ok(()) => true,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_e, "cache health check failed");
                false
            }
        };
        let cache_size = if reachable {
            self.cache.entry_count().await
        } else {
            0
        };
        HealthReport {
            status: if reachable { "healthy" } else { "degraded" }.to_string(),
            cache_backend: self.cache.backend().to_string(),
            cache_reachable: reachable,
            cache_size,
            providers: self.connectors.iter().map(|c| c.name().to_string()).collect(),
            timestamp: Utc::now(),
        }
    }
}
