//! Mock connectors for tests and offline demos.
//!
//! - [`MockConnector`] serves static fixtures and recognizes a few magic
//!   symbols (`FAIL`, `BAD`, `TIMEOUT`).
//! - [`DynamicMockConnector`] is driven from the outside through a
//!   [`DynamicMockController`] and counts every call it receives.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use pulse_core::connector::{BatchQuoteProvider, PulseConnector, QuoteProvider};
use pulse_core::{PulseError, Quote, WorkerPool, fan_out_quotes};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};

const NAME: &str = "pulse-mock";

/// Mock connector for CI-safe demos. Provides deterministic data from static fixtures.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn maybe_fail_or_timeout(symbol: &str) -> Result<(), PulseError> {
        match symbol {
            "FAIL" => Err(PulseError::unavailable(NAME, "forced failure")),
            "TIMEOUT" => {
                // Long enough to trip a short engine timeout in tests.
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl PulseConnector for MockConnector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_quote_provider(&self) -> Option<&dyn QuoteProvider> {
        Some(self as &dyn QuoteProvider)
    }

    fn as_batch_quote_provider(&self) -> Option<&dyn BatchQuoteProvider> {
        Some(self as &dyn BatchQuoteProvider)
    }
}

#[async_trait]
impl QuoteProvider for MockConnector {
    async fn quote(&self, symbol: &str) -> Result<Quote, PulseError> {
        Self::maybe_fail_or_timeout(symbol).await?;
        if symbol == "BAD" {
            return Quote::price_only(symbol, 0.0, NAME).validate(NAME);
        }
        fixtures::quotes::by_symbol(symbol)
            .ok_or_else(|| PulseError::unavailable(NAME, format!("no fixture for {symbol}")))
    }
}

#[async_trait]
impl BatchQuoteProvider for MockConnector {
    async fn quotes(
        &self,
        symbols: &[String],
        pool: &WorkerPool,
    ) -> Result<HashMap<String, Quote>, PulseError> {
        Ok(fan_out_quotes(
            NAME,
            self,
            symbols,
            pool,
            self.batch_concurrency(),
            Duration::from_secs(1),
        )
        .await)
    }
}
