use crate::helpers::{AAPL, CountingConnector, FixedBatchConnector, MSFT, TSLA};
use pulse::{Pulse, PulseError};
use pulse_mock::{DynamicMockConnector, MockBehavior};

#[tokio::test]
async fn first_non_empty_batch_wins_and_gaps_are_synthesized() {
    let empty = FixedBatchConnector::new("empty", &[]);
    let partial = FixedBatchConnector::new("partial", &[(AAPL, 1.5), ("NOT-ASKED", 9.0)]);
    let later = FixedBatchConnector::new("later", &[(AAPL, 2.0), (MSFT, 2.0), (TSLA, 2.0)]);
    let single = CountingConnector::ok("single", 3.0);

    let pulse = Pulse::builder()
        .with_connector(empty.clone())
        .with_connector(partial.clone())
        .with_connector(later.clone())
        .with_connector(single.clone())
        .build()
        .unwrap();

    let out = pulse.resolve_many(&[AAPL, MSFT, TSLA]).await;
    assert_eq!(out.len(), 3);
    assert_eq!(out[AAPL].source, "partial");
    assert!(out[MSFT].is_synthetic());
    assert!(out[TSLA].is_synthetic());
    assert!(!out.contains_key("NOT-ASKED"));

    assert_eq!(empty.calls(), 1);
    assert_eq!(partial.calls(), 1);
    assert_eq!(later.calls(), 0);
    assert_eq!(single.calls(), 0);

    // The batch quote was cached; synthetic fills were not.
    assert_eq!(pulse.resolve(AAPL).await.source, "partial");
    assert_eq!(pulse.resolve(MSFT).await.source, "single");
}

#[tokio::test]
async fn failing_batch_falls_through_to_next_batch_connector() {
    let (broken, ctl) = DynamicMockConnector::new_batch_with_controller("broken");
    ctl.set_batch_behavior(MockBehavior::Fail(PulseError::unavailable("broken", "HTTP 500")))
        .await;
    let ok = FixedBatchConnector::new("ok", &[(AAPL, 1.0), (MSFT, 1.0)]);

    let pulse = Pulse::builder()
        .with_connector(broken)
        .with_connector(ok.clone())
        .build()
        .unwrap();

    let out = pulse.resolve_many(&["aapl", "msft", "AAPL"]).await;
    assert_eq!(out.len(), 2);
    assert!(out.values().all(|q| q.source == "ok"));
    assert_eq!(ctl.batch_requests().await, vec![vec![AAPL.to_string(), MSFT.to_string()]]);
}

#[tokio::test]
async fn cached_symbols_are_not_sent_to_providers() {
    let (spy, ctl) = DynamicMockConnector::new_batch_with_controller("spy");
    ctl.set_batch_behavior(MockBehavior::Return(Default::default())).await;
    let single = CountingConnector::ok("single", 4.0);

    let pulse = Pulse::builder()
        .with_connector(spy)
        .with_connector(single.clone())
        .build()
        .unwrap();
    let _ = pulse.resolve(AAPL).await;
    assert_eq!(single.calls(), 1);

    let out = pulse.resolve_many(&[AAPL, MSFT]).await;
    assert_eq!(out[AAPL].source, "single");
    assert_eq!(out[MSFT].source, "single");
    assert_eq!(ctl.batch_requests().await, vec![vec![MSFT.to_string()]]);
}

#[tokio::test(start_paused = true)]
async fn batch_timeout_counts_as_failure() {
    let (hang, ctl) = DynamicMockConnector::new_batch_with_controller("hang");
    ctl.set_batch_behavior(MockBehavior::Hang).await;
    let ok = FixedBatchConnector::new("ok", &[(AAPL, 1.0)]);

    let pulse = Pulse::builder()
        .with_connector(hang)
        .with_connector(ok.clone())
        .batch_timeout(Some(std::time::Duration::from_millis(100)))
        .build()
        .unwrap();

    let out = pulse.resolve_many(&[AAPL]).await;
    assert_eq!(out[AAPL].source, "ok");
}
