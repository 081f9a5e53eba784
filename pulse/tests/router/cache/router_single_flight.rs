use std::sync::Arc;
use std::time::Duration;

use crate::helpers::{AAPL, CountingConnector, TSLA};
use pulse::Pulse;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_resolves_of_one_symbol_share_one_provider_call() {
    let c = CountingConnector::slow("slow", 10.0, Duration::from_millis(50));
    let pulse = Arc::new(
        Pulse::builder()
            .with_connector(c.clone())
            .build()
            .unwrap(),
    );

    let mut handles = Vec::new();
    for _ in 0..10 {
        let p = Arc::clone(&pulse);
        handles.push(tokio::spawn(async move { p.resolve(AAPL).await }));
    }
    let mut quotes = Vec::new();
    for h in handles {
        quotes.push(h.await.unwrap());
    }

    assert_eq!(c.calls(), 1);
    assert!(quotes.iter().all(|q| q == &quotes[0]));
}

#[tokio::test]
async fn different_symbols_resolve_independently() {
    let c = CountingConnector::slow("slow", 10.0, Duration::from_millis(20));
    let pulse = Pulse::builder().with_connector(c.clone()).build().unwrap();
    let (a, t) = tokio::join!(pulse.resolve(AAPL), pulse.resolve(TSLA));
    assert_eq!(a.symbol, AAPL);
    assert_eq!(t.symbol, TSLA);
    assert_eq!(c.calls(), 2);
    assert_eq!(c.peak(), 2);
}

#[tokio::test(start_paused = true)]
async fn outage_costs_concurrent_callers_one_timeout() {
    let hung = CountingConnector::slow("hung", 10.0, Duration::from_secs(3600));
    let pulse = Arc::new(
        Pulse::builder()
            .with_connector(hung.clone())
            .provider_timeout(Duration::from_millis(100))
            .build()
            .unwrap(),
    );

    let started = tokio::time::Instant::now();
    let handles: Vec<_> = (0..5)
        .map(|_| {
            let p = Arc::clone(&pulse);
            tokio::spawn(async move { p.resolve(AAPL).await })
        })
        .collect();
    let mut quotes = Vec::new();
    for h in handles {
        quotes.push(h.await.unwrap());
    }

    assert_eq!(hung.calls(), 1);
    assert!(started.elapsed() < Duration::from_millis(200));
    assert!(quotes.iter().all(|q| !q.is_real_time && q == &quotes[0]));

    // The synthetic result is not remembered once the flight is over.
    let _ = pulse.resolve(AAPL).await;
    assert_eq!(hung.calls(), 2);
}
