use std::time::Duration;

use crate::helpers::CountingConnector;
use pulse::{Pulse, PulseError};

#[test]
fn zero_workers_is_rejected() {
    let err = Pulse::builder().max_workers(0).build().err().unwrap();
    assert!(matches!(err, PulseError::InvalidArg(_)));
}

#[test]
fn zero_provider_timeout_is_rejected() {
    let err = Pulse::builder()
        .provider_timeout(Duration::ZERO)
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, PulseError::InvalidArg(_)));
}

#[test]
fn zero_batch_timeout_is_rejected() {
    let err = Pulse::builder()
        .batch_timeout(Some(Duration::ZERO))
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, PulseError::InvalidArg(_)));
}

#[test]
fn duplicate_connector_names_keep_first_position() {
    let a = CountingConnector::ok("a", 1.0);
    let b = CountingConnector::ok("b", 2.0);
    let a2 = CountingConnector::ok("a", 3.0);
    let pulse = Pulse::builder()
        .with_connector(a)
        .with_connector(b)
        .with_connector(a2)
        .build()
        .unwrap();
    let names: Vec<_> = pulse.connectors().iter().map(|c| c.name()).collect();
    assert_eq!(names, ["a", "b"]);
}

#[test]
fn defaults_match_documented_configuration() {
    let pulse = Pulse::builder().build().unwrap();
    let cfg = pulse.config();
    assert_eq!(cfg.cache_ttl, Duration::from_secs(30));
    assert_eq!(cfg.provider_timeout, Duration::from_secs(10));
    assert_eq!(cfg.max_workers, 5);
    assert!(cfg.batch_timeout.is_none());
    assert_eq!(pulse.pool().size(), 5);
}
