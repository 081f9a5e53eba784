use crate::helpers::{AAPL, CountingConnector, RecordingObserver, ZZZZ};
use pulse::Pulse;

#[tokio::test]
async fn observer_sees_attempts_hits_and_synthesis() {
    let obs = RecordingObserver::new();
    let pulse = Pulse::builder()
        .with_connector(CountingConnector::failing("down"))
        .with_connector(CountingConnector::ok("up", 1.0))
        .with_observer(obs.clone())
        .build()
        .unwrap();

    let _ = pulse.resolve(AAPL).await;
    let _ = pulse.resolve(AAPL).await;
    assert_eq!(
        obs.events(),
        [
            "miss:AAPL",
            "quote:down:unavailable",
            "quote:up:success",
            "hit:AAPL",
        ]
    );

    let only_down = RecordingObserver::new();
    let pulse = Pulse::builder()
        .with_connector(CountingConnector::failing("down"))
        .with_observer(only_down.clone())
        .build()
        .unwrap();
    let _ = pulse.resolve(ZZZZ).await;
    assert_eq!(
        only_down.events(),
        ["miss:ZZZZ", "quote:down:unavailable", "synthetic:ZZZZ"]
    );
}

#[tokio::test]
async fn batch_fallback_reports_one_miss_per_symbol() {
    let obs = RecordingObserver::new();
    let pulse = Pulse::builder()
        .with_connector(CountingConnector::ok("up", 1.0))
        .with_observer(obs.clone())
        .build()
        .unwrap();

    let _ = pulse.resolve_many(&[AAPL, ZZZZ]).await;
    let events = obs.events();
    assert_eq!(events.iter().filter(|e| e.starts_with("miss:")).count(), 2);
    assert_eq!(events.iter().filter(|e| e.as_str() == "quote:up:success").count(), 2);
}
