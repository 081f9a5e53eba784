use std::time::Duration;

use crate::helpers::{AAPL, CountingConnector, MSFT};
use pulse::Pulse;

#[tokio::test]
async fn hit_within_ttl_returns_identical_quote_without_provider_call() {
    let c = CountingConnector::ok("c", 10.0);
    let pulse = Pulse::builder()
        .with_connector(c.clone())
        .cache_ttl(Duration::from_secs(30))
        .build()
        .unwrap();

    let first = pulse.resolve(AAPL).await;
    let second = pulse.resolve(" aapl ").await;
    assert_eq!(first, second);
    assert_eq!(c.calls(), 1);
}

#[tokio::test]
async fn providers_are_reinvoked_after_expiry() {
    let c = CountingConnector::ok("c", 10.0);
    let pulse = Pulse::builder()
        .with_connector(c.clone())
        .cache_ttl(Duration::from_millis(50))
        .build()
        .unwrap();

    let _ = pulse.resolve(MSFT).await;
    let _ = pulse.resolve(MSFT).await;
    assert_eq!(c.calls(), 1);

    tokio::time::sleep(Duration::from_millis(80)).await;
    let _ = pulse.resolve(MSFT).await;
    assert_eq!(c.calls(), 2);
}

#[tokio::test]
async fn zero_ttl_disables_caching() {
    let c = CountingConnector::ok("c", 10.0);
    let pulse = Pulse::builder()
        .with_connector(c.clone())
        .cache_ttl(Duration::ZERO)
        .build()
        .unwrap();

    let _ = pulse.resolve(AAPL).await;
    let _ = pulse.resolve(AAPL).await;
    assert_eq!(c.calls(), 2);
}
