use crate::helpers::{AAPL, CountingConnector, m_quote};
use pulse::{Pulse, PulseError};
use pulse_mock::{DynamicMockConnector, MockBehavior};

#[tokio::test]
async fn first_success_wins_and_later_providers_are_not_called() {
    let a = CountingConnector::failing("a");
    let b = CountingConnector::ok("b", 42.0);
    let c = CountingConnector::ok("c", 99.0);

    let pulse = Pulse::builder()
        .with_connector(a.clone())
        .with_connector(b.clone())
        .with_connector(c.clone())
        .build()
        .unwrap();

    let q = pulse.resolve(AAPL).await;
    assert_eq!(q.source, "b");
    assert!((q.price - 42.0).abs() < f64::EPSILON);
    assert!(q.is_real_time);
    assert_eq!(a.calls(), 1);
    assert_eq!(b.calls(), 1);
    assert_eq!(c.calls(), 0);
}

#[tokio::test]
async fn twelve_fails_alpha_answers() {
    let (twelve, twelve_ctl) = DynamicMockConnector::new_with_controller("twelve-data");
    let (alpha, alpha_ctl) = DynamicMockConnector::new_with_controller("alpha-vantage");
    twelve_ctl
        .set_default_quote_behavior(MockBehavior::Fail(PulseError::unavailable(
            "twelve-data",
            "HTTP 503",
        )))
        .await;
    let mut q = m_quote(AAPL, 150.00, "alpha-vantage");
    q.change = 1.5;
    q.change_percent = 1.01;
    alpha_ctl
        .set_quote_behavior(AAPL, MockBehavior::Return(q))
        .await;

    let pulse = Pulse::builder()
        .with_connector(twelve)
        .with_connector(alpha)
        .build()
        .unwrap();

    let got = pulse.resolve("aapl").await;
    assert_eq!(got.symbol, AAPL);
    assert!((got.price - 150.00).abs() < f64::EPSILON);
    assert!((got.change - 1.5).abs() < f64::EPSILON);
    assert!((got.change_percent - 1.01).abs() < f64::EPSILON);
    assert_eq!(got.source, "alpha-vantage");
    assert!(got.is_real_time);

    // Cached: a second resolve touches no provider.
    let again = pulse.resolve(AAPL).await;
    assert_eq!(again, got);
    assert_eq!(twelve_ctl.quote_calls(AAPL).await, 1);
    assert_eq!(alpha_ctl.quote_calls(AAPL).await, 1);
}

#[tokio::test]
async fn connectors_without_quote_capability_are_skipped() {
    let batch_only = crate::helpers::FixedBatchConnector::new("batch-only", &[(AAPL, 1.0)]);
    let b = CountingConnector::ok("b", 7.0);
    let pulse = Pulse::builder()
        .with_connector(batch_only.clone())
        .with_connector(b.clone())
        .build()
        .unwrap();
    assert_eq!(pulse.resolve(AAPL).await.source, "b");
    assert_eq!(batch_only.calls(), 0);
}
