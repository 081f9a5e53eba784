use crate::helpers::{AAPL, CountingConnector, m_quote};
use pulse::Pulse;
use pulse_mock::{DynamicMockConnector, MockBehavior};

#[tokio::test]
async fn zero_price_falls_through_to_next_provider() {
    let (bad, bad_ctl) = DynamicMockConnector::new_with_controller("bad");
    bad_ctl
        .set_default_quote_behavior(MockBehavior::Return(m_quote(AAPL, 0.0, "bad")))
        .await;
    let good = CountingConnector::ok("good", 10.0);

    let pulse = Pulse::builder()
        .with_connector(bad)
        .with_connector(good.clone())
        .build()
        .unwrap();

    let q = pulse.resolve(AAPL).await;
    assert_eq!(q.source, "good");
    assert_eq!(good.calls(), 1);
}

#[tokio::test]
async fn invalid_quote_is_never_cached_or_returned() {
    let (bad, bad_ctl) = DynamicMockConnector::new_with_controller("bad");
    bad_ctl
        .set_default_quote_behavior(MockBehavior::Return(m_quote(AAPL, f64::NAN, "bad")))
        .await;

    let pulse = Pulse::builder().with_connector(bad).build().unwrap();

    let first = pulse.resolve(AAPL).await;
    assert!(!first.is_real_time);
    assert_eq!(first.source, "enhanced-mock");
    assert!(first.price > 0.0);

    // Nothing was cached, so the provider is asked again.
    let _ = pulse.resolve(AAPL).await;
    assert_eq!(bad_ctl.quote_calls(AAPL).await, 2);
}

#[tokio::test]
async fn provider_symbol_is_rekeyed_to_request() {
    let (odd, ctl) = DynamicMockConnector::new_with_controller("odd");
    ctl.set_default_quote_behavior(MockBehavior::Return(m_quote("aapl.us", 5.0, "odd")))
        .await;
    let pulse = Pulse::builder().with_connector(odd).build().unwrap();

    assert_eq!(pulse.resolve(AAPL).await.symbol, AAPL);
    let _ = pulse.resolve(AAPL).await;
    assert_eq!(ctl.quote_calls(AAPL).await, 1);
}
