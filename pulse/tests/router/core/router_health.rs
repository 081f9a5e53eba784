use std::sync::Arc;

use async_trait::async_trait;
use pulse::{Pulse, PulseError, Quote, QuoteCache};
use pulse_mock::MockConnector;

use crate::helpers::CountingConnector;

#[tokio::test]
async fn reports_cache_and_provider_chain() {
    let pulse = Pulse::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .with_connector(CountingConnector::ok("backup", 1.0))
        .build()
        .unwrap();

    let _ = pulse.resolve("AAPL").await;
    let _ = pulse.resolve("MSFT").await;
    let _ = pulse.resolve("NO-SUCH").await;

    let h = pulse.health().await;
    assert_eq!(h.status, "healthy");
    assert_eq!(h.cache_backend, "memory");
    assert!(h.cache_reachable);
    assert_eq!(h.cache_size, 3);
    assert_eq!(h.providers, ["pulse-mock", "backup"]);
}

struct BrokenCache;

#[async_trait]
impl QuoteCache for BrokenCache {
    async fn get(&self, _symbol: &str) -> Result<Option<Quote>, PulseError> {
        Err(PulseError::Cache("connection refused".into()))
    }

    async fn put(&self, _quote: Quote) -> Result<(), PulseError> {
        Err(PulseError::Cache("connection refused".into()))
    }

    async fn entry_count(&self) -> u64 {
        0
    }

    fn backend(&self) -> &'static str {
        "remote"
    }

    async fn health(&self) -> Result<(), PulseError> {
        Err(PulseError::Cache("connection refused".into()))
    }
}

#[tokio::test]
async fn unreachable_cache_degrades_but_still_resolves() {
    let c = CountingConnector::ok("c", 2.0);
    let pulse = Pulse::builder()
        .with_connector(c.clone())
        .with_cache(Arc::new(BrokenCache))
        .build()
        .unwrap();

    let q = pulse.resolve("AAPL").await;
    assert_eq!(q.source, "c");
    let _ = pulse.resolve("AAPL").await;
    assert_eq!(c.calls(), 2);

    let h = pulse.health().await;
    assert_eq!(h.status, "degraded");
    assert_eq!(h.cache_backend, "remote");
    assert!(!h.cache_reachable);
}
