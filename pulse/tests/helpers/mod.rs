#![allow(dead_code)]

pub mod counting_connector;

pub use counting_connector::{CountingConnector, FixedBatchConnector};

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;
use pulse::{AttemptOutcome, Capability, Quote, ResolutionObserver};

/// Common symbol constants used across tests.
pub const AAPL: &str = "AAPL";
pub const MSFT: &str = "MSFT";
pub const TSLA: &str = "TSLA";
pub const ZZZZ: &str = "ZZZZ";

/// Fully populated real-time quote.
pub fn m_quote(sym: &str, price: f64, source: &str) -> Quote {
    Quote {
        symbol: sym.to_string(),
        price,
        change: 0.0,
        change_percent: 0.0,
        open: price,
        high: price,
        low: price,
        previous_close: price,
        volume: 1_000,
        timestamp: Utc::now(),
        source: source.to_string(),
        is_real_time: true,
    }
}

/// Observer that records every event as a string.
#[derive(Default)]
pub struct RecordingObserver {
    pub events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, e: String) {
        self.events.lock().unwrap().push(e);
    }
}

impl ResolutionObserver for RecordingObserver {
    fn cache_hit(&self, symbol: &str) {
        self.push(format!("hit:{symbol}"));
    }

    fn cache_miss(&self, symbol: &str) {
        self.push(format!("miss:{symbol}"));
    }

    fn provider_attempt(
        &self,
        connector: &str,
        capability: Capability,
        outcome: AttemptOutcome,
        _elapsed: Duration,
    ) {
        self.push(format!("{capability}:{connector}:{}", outcome.as_str()));
    }

    fn synthesized(&self, symbol: &str) {
        self.push(format!("synthetic:{symbol}"));
    }
}
