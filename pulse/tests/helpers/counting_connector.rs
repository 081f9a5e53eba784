use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pulse::{BatchQuoteProvider, PulseConnector, PulseError, Quote, QuoteProvider, WorkerPool};

use super::m_quote;

/// Quote connector that serves a fixed price for every symbol, counts calls
/// and tracks its peak concurrency.
pub struct CountingConnector {
    pub name: &'static str,
    pub price: f64,
    pub delay: Duration,
    pub fail: bool,
    pub calls: AtomicUsize,
    active: AtomicUsize,
    pub peak: AtomicUsize,
}

impl CountingConnector {
    pub fn ok(name: &'static str, price: f64) -> Arc<Self> {
        Arc::new(Self::new(name, price, Duration::ZERO, false))
    }

    pub fn failing(name: &'static str) -> Arc<Self> {
        Arc::new(Self::new(name, 1.0, Duration::ZERO, true))
    }

    pub fn slow(name: &'static str, price: f64, delay: Duration) -> Arc<Self> {
        Arc::new(Self::new(name, price, delay, false))
    }

    fn new(name: &'static str, price: f64, delay: Duration, fail: bool) -> Self {
        Self {
            name,
            price,
            delay,
            fail,
            calls: AtomicUsize::new(0),
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl PulseConnector for CountingConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn as_quote_provider(&self) -> Option<&dyn QuoteProvider> {
        Some(self as &dyn QuoteProvider)
    }
}

#[async_trait]
impl QuoteProvider for CountingConnector {
    async fn quote(&self, symbol: &str) -> Result<Quote, PulseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.active.fetch_sub(1, Ordering::SeqCst);
        if self.fail {
            return Err(PulseError::unavailable(self.name, "forced failure"));
        }
        Ok(m_quote(symbol, self.price, self.name))
    }
}

/// Batch-only connector returning a fixed map and counting calls.
pub struct FixedBatchConnector {
    pub name: &'static str,
    pub answer: HashMap<String, Quote>,
    pub calls: AtomicUsize,
}

impl FixedBatchConnector {
    pub fn new(name: &'static str, answer: &[(&str, f64)]) -> Arc<Self> {
        Arc::new(Self {
            name,
            answer: answer
                .iter()
                .map(|(s, p)| ((*s).to_string(), m_quote(s, *p, name)))
                .collect(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PulseConnector for FixedBatchConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn as_batch_quote_provider(&self) -> Option<&dyn BatchQuoteProvider> {
        Some(self as &dyn BatchQuoteProvider)
    }
}

#[async_trait]
impl BatchQuoteProvider for FixedBatchConnector {
    async fn quotes(
        &self,
        _symbols: &[String],
        _pool: &WorkerPool,
    ) -> Result<HashMap<String, Quote>, PulseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.answer.clone())
    }
}
