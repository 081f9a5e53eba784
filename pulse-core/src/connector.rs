use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::pool::WorkerPool;
use pulse_types::{Capability, Quote};
pub use pulse_types::PulseError;

/// Default number of concurrent calls a connector may issue during a batch.
pub const DEFAULT_BATCH_CONCURRENCY: usize = 5;

/// Focused role trait for connectors that provide single-symbol quotes.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetch a point-in-time quote for a normalized symbol.
    ///
    /// Implementations must only return quotes with a positive, finite price.
    async fn quote(&self, symbol: &str) -> Result<Quote, PulseError>;
}

/// Focused role trait for connectors that can resolve several symbols in one call.
#[async_trait]
pub trait BatchQuoteProvider: Send + Sync {
    /// Fetch quotes for many symbols at once.
    ///
    /// The returned map may be partial: symbols the provider could not serve
    /// are simply absent. Connectors without a native batch endpoint fan out
    /// over `pool`, see [`crate::fan_out_quotes`].
    async fn quotes(
        &self,
        symbols: &[String],
        pool: &WorkerPool,
    ) -> Result<HashMap<String, Quote>, PulseError>;
}

/// Main connector trait implemented by every quote provider adapter.
///
/// A connector advertises each capability by returning a trait object from
/// the matching `as_*_provider` accessor.
pub trait PulseConnector: Send + Sync {
    /// A stable identifier for priority lists; also the `source` of its quotes.
    fn name(&self) -> &'static str;

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Per-call timeout override. `None` uses the engine-wide timeout.
    fn timeout(&self) -> Option<Duration> {
        None
    }

    /// Upper bound on concurrent calls this connector issues during a batch.
    fn batch_concurrency(&self) -> usize {
        DEFAULT_BATCH_CONCURRENCY
    }

    /// Advertise quote capability by returning a usable trait object reference when supported.
    fn as_quote_provider(&self) -> Option<&dyn QuoteProvider> {
        None
    }

    /// Advertise batch quote capability.
    fn as_batch_quote_provider(&self) -> Option<&dyn BatchQuoteProvider> {
        None
    }

    /// Whether the connector advertises `capability`.
    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Quote => self.as_quote_provider().is_some(),
            Capability::BatchQuote => self.as_batch_quote_provider().is_some(),
        }
    }
}
