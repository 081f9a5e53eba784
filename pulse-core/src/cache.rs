//! Freshness cache seam.

use async_trait::async_trait;

use pulse_types::{PulseError, Quote};

/// Short-lived symbol to quote store consulted before any provider call.
///
/// Entries expire passively: `get` must never return a quote older than the
/// backend's TTL. Only quotes from real providers are written; synthetic
/// quotes never reach `put`.
#[async_trait]
pub trait QuoteCache: Send + Sync {
    /// Live entry for a normalized symbol, if any.
    async fn get(&self, symbol: &str) -> Result<Option<Quote>, PulseError>;

    /// Store `quote` under its symbol, replacing any previous entry.
    async fn put(&self, quote: Quote) -> Result<(), PulseError>;

    /// Approximate number of live entries.
    async fn entry_count(&self) -> u64;

    /// Short backend label, reported by health checks.
    fn backend(&self) -> &'static str;

    /// Check that the backend is reachable.
    async fn health(&self) -> Result<(), PulseError> {
        Ok(())
    }
}
