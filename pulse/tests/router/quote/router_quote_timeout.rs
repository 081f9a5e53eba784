use std::time::Duration;

use crate::helpers::{AAPL, CountingConnector};
use pulse::Pulse;
use pulse_mock::{DynamicMockConnector, MockBehavior};

#[tokio::test(start_paused = true)]
async fn hanging_provider_times_out_and_next_one_answers() {
    let (hang, ctl) = DynamicMockConnector::new_with_controller("hang");
    ctl.set_default_quote_behavior(MockBehavior::Hang).await;
    let ok = CountingConnector::ok("ok", 3.0);

    let pulse = Pulse::builder()
        .with_connector(hang)
        .with_connector(ok.clone())
        .provider_timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let q = pulse.resolve(AAPL).await;
    assert_eq!(q.source, "ok");
    assert_eq!(ok.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn every_provider_hanging_still_resolves() {
    let (hang, ctl) = DynamicMockConnector::new_with_controller("hang");
    ctl.set_default_quote_behavior(MockBehavior::Hang).await;
    let pulse = Pulse::builder()
        .with_connector(hang)
        .provider_timeout(Duration::from_millis(20))
        .build()
        .unwrap();

    let q = tokio::time::timeout(Duration::from_secs(1), pulse.resolve(AAPL))
        .await
        .expect("resolve must finish once the provider times out");
    assert!(q.is_synthetic());
}
