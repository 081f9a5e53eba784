//! In-process freshness cache for resolved quotes.
#![warn(missing_docs)]

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;

use pulse_core::{PulseConfig, PulseError, Quote, QuoteCache};

/// Moka-backed TTL cache keyed by normalized symbol.
///
/// Expiry is measured from insertion. A zero TTL disables the cache: writes
/// are discarded and every read misses.
#[derive(Clone)]
pub struct MemoryQuoteCache {
    inner: Cache<String, Quote>,
    ttl: Duration,
}

impl MemoryQuoteCache {
    /// Cache holding at most `capacity` symbols for `ttl` each.
    #[must_use]
    pub fn new(ttl: Duration, capacity: u64) -> Self {
        let mut builder = Cache::<String, Quote>::builder().max_capacity(capacity);
        if !ttl.is_zero() {
            builder = builder.time_to_live(ttl);
        }
        Self {
            inner: builder.build(),
            ttl,
        }
    }

    /// Cache sized and timed from the engine configuration.
    #[must_use]
    pub fn from_config(cfg: &PulseConfig) -> Self {
        Self::new(cfg.cache_ttl, cfg.cache_capacity)
    }

    /// Configured time-to-live.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    const fn enabled(&self) -> bool {
        !self.ttl.is_zero()
    }
}

impl std::fmt::Debug for MemoryQuoteCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryQuoteCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.inner.entry_count())
            .finish()
    }
}

#[async_trait]
impl QuoteCache for MemoryQuoteCache {
    async fn get(&self, symbol: &str) -> Result<Option<Quote>, PulseError> {
        if !self.enabled() {
            return Ok(None);
        }
        Ok(self.inner.get(symbol).await)
    }

    async fn put(&self, quote: Quote) -> Result<(), PulseError> {
        if !self.enabled() {
            return Ok(());
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(symbol = %quote.symbol, source = %quote.source, "caching quote");
        self.inner.insert(quote.symbol.clone(), quote).await;
        Ok(())
    }

    async fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks().await;
        self.inner.entry_count()
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
