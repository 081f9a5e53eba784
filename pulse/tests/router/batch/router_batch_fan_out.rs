use std::time::Duration;

use crate::helpers::CountingConnector;
use pulse::Pulse;

#[tokio::test]
async fn fan_out_resolves_each_symbol_within_pool_ceiling() {
    let failing = CountingConnector::failing("down");
    let slow = CountingConnector::slow("slow", 8.0, Duration::from_millis(10));

    let pulse = Pulse::builder()
        .with_connector(failing.clone())
        .with_connector(slow.clone())
        .max_workers(2)
        .build()
        .unwrap();

    let syms: Vec<String> = (0..10).map(|i| format!("S{i}")).collect();
    let out = pulse.resolve_many(&syms).await;

    assert_eq!(out.len(), 10);
    assert!(out.values().all(|q| q.source == "slow"));
    assert_eq!(slow.calls(), 10);
    assert_eq!(failing.calls(), 10);
    assert!(slow.peak() <= 2, "peak {} exceeds pool size", slow.peak());
    assert_eq!(pulse.pool().available(), 2);
}

#[tokio::test]
async fn fan_out_synthesizes_when_everything_fails() {
    let failing = CountingConnector::failing("down");
    let pulse = Pulse::builder()
        .with_connector(failing.clone())
        .build()
        .unwrap();

    let out = pulse.resolve_many(&["AAPL", "ZZZZ"]).await;
    assert_eq!(out.len(), 2);
    assert!(out.values().all(pulse::Quote::is_synthetic));
}
