use crate::helpers::{CountingConnector, ZZZZ};
use pulse::{Pulse, SyntheticGenerator};
use pulse_core::fnv1a;

#[tokio::test]
async fn all_providers_failing_yields_uncached_synthetic_quote() {
    let a = CountingConnector::failing("a");
    let b = CountingConnector::failing("b");
    let pulse = Pulse::builder()
        .with_connector(a.clone())
        .with_connector(b.clone())
        .build()
        .unwrap();

    let q = pulse.resolve(ZZZZ).await;
    #[allow(clippy::cast_precision_loss)]
    let base = 100.0 + (fnv1a(ZZZZ.as_bytes()) % 200) as f64;
    assert_eq!(q.symbol, ZZZZ);
    assert_eq!(q.source, "enhanced-mock");
    assert!(!q.is_real_time);
    assert!(q.price > 0.0);
    assert!((q.price - base).abs() <= 3.0 + 0.01);

    let _ = pulse.resolve(ZZZZ).await;
    assert_eq!(a.calls(), 2);
    assert_eq!(b.calls(), 2);
}

#[tokio::test]
async fn no_connectors_still_answers() {
    let pulse = Pulse::builder().build().unwrap();
    let q = pulse.resolve("aapl").await;
    assert!(q.is_synthetic());
    assert!((q.open - SyntheticGenerator::default().base_price("AAPL")).abs() < f64::EPSILON);
}
