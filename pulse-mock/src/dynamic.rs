use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use pulse_core::connector::{BatchQuoteProvider, PulseConnector, QuoteProvider};
use pulse_core::{PulseError, Quote, WorkerPool};

/// Instruction for how a method should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Return the provided value after sleeping.
    Delayed(Duration, T),
    /// Fail immediately with the provided error.
    Fail(PulseError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

impl<T> MockBehavior<T> {
    async fn play(self, capability: &'static str) -> Result<T, PulseError> {
        match self {
            Self::Return(v) => Ok(v),
            Self::Delayed(d, v) => {
                tokio::time::sleep(d).await;
                Ok(v)
            }
            Self::Fail(e) => Err(e),
            Self::Hang => {
                std::future::pending::<()>().await;
                Err(PulseError::unsupported(capability))
            }
        }
    }
}

#[derive(Default)]
struct InternalState {
    quote_rules: HashMap<String, MockBehavior<Quote>>,
    default_quote: Option<MockBehavior<Quote>>,
    batch_rule: Option<MockBehavior<HashMap<String, Quote>>>,
    quote_calls: HashMap<String, usize>,
    batch_requests: Vec<Vec<String>>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
#[derive(Clone)]
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `quote` calls for a specific symbol.
    pub async fn set_quote_behavior(&self, symbol: &str, behavior: MockBehavior<Quote>) {
        let mut guard = self.state.lock().await;
        guard.quote_rules.insert(symbol.to_string(), behavior);
    }

    /// Behavior for symbols without a specific rule.
    pub async fn set_default_quote_behavior(&self, behavior: MockBehavior<Quote>) {
        self.state.lock().await.default_quote = Some(behavior);
    }

    /// Set the behavior for batch calls (batch-capable mocks only).
    pub async fn set_batch_behavior(&self, behavior: MockBehavior<HashMap<String, Quote>>) {
        self.state.lock().await.batch_rule = Some(behavior);
    }

    /// Number of `quote` calls received for `symbol`.
    pub async fn quote_calls(&self, symbol: &str) -> usize {
        let guard = self.state.lock().await;
        guard.quote_calls.get(symbol).copied().unwrap_or(0)
    }

    /// Number of `quote` calls received across all symbols.
    pub async fn total_quote_calls(&self) -> usize {
        self.state.lock().await.quote_calls.values().sum()
    }

    /// Symbol lists of every batch call, in arrival order.
    pub async fn batch_requests(&self) -> Vec<Vec<String>> {
        self.state.lock().await.batch_requests.clone()
    }

    /// Clear all configured behaviors and call logs.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        *guard = InternalState::default();
    }
}

/// A connector that defers all behavior to an external controller.
pub struct DynamicMockConnector {
    name: &'static str,
    batch: bool,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    fn build(name: &'static str, batch: bool) -> (Arc<dyn PulseConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, batch, state });
        (me as Arc<dyn PulseConnector>, controller)
    }

    /// Create a quote-only dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn PulseConnector>, DynamicMockController) {
        Self::build(name, false)
    }

    /// Create a dynamic mock that also advertises batch quotes.
    #[must_use]
    pub fn new_batch_with_controller(
        name: &'static str,
    ) -> (Arc<dyn PulseConnector>, DynamicMockController) {
        Self::build(name, true)
    }
}

impl PulseConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn as_quote_provider(&self) -> Option<&dyn QuoteProvider> {
        Some(self as &dyn QuoteProvider)
    }

    fn as_batch_quote_provider(&self) -> Option<&dyn BatchQuoteProvider> {
        if self.batch {
            Some(self as &dyn BatchQuoteProvider)
        } else {
            None
        }
    }
}

#[async_trait]
impl QuoteProvider for DynamicMockConnector {
    async fn quote(&self, symbol: &str) -> Result<Quote, PulseError> {
        // Snapshot the behavior without holding the lock across the await below
        let behavior = {
            let mut guard = self.state.lock().await;
            *guard.quote_calls.entry(symbol.to_string()).or_default() += 1;
            guard
                .quote_rules
                .get(symbol)
                .or(guard.default_quote.as_ref())
                .cloned()
        };
        match behavior {
            Some(b) => b.play("quote").await,
            None => Err(PulseError::unavailable(self.name, format!("no rule for {symbol}"))),
        }
    }
}

#[async_trait]
impl BatchQuoteProvider for DynamicMockConnector {
    async fn quotes(
        &self,
        symbols: &[String],
        _pool: &WorkerPool,
    ) -> Result<HashMap<String, Quote>, PulseError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.batch_requests.push(symbols.to_vec());
            guard.batch_rule.clone()
        };
        match behavior {
            Some(b) => b.play("batch-quote").await,
            None => Err(PulseError::unsupported("batch-quote")),
        }
    }
}
