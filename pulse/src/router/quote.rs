use std::time::Instant;

use pulse_core::{Capability, PulseError, Quote, normalize_symbol};

use crate::Pulse;
use crate::router::util::collapse_errors;

impl Pulse {
    /// Resolve a current quote for `symbol`. Never fails.
    ///
    /// Order of resolution:
    /// - a live cache entry, without any provider call;
    /// - the first quote-capable connector, in priority order, that answers
    ///   with a valid quote within its timeout (the quote is cached);
    /// - otherwise a synthetic quote (`is_real_time == false`), not cached.
    ///
    /// Concurrent calls for the same symbol are collapsed: one performs the
    /// provider chain and every caller receives its result.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "pulse::quote::resolve", skip(self), fields(symbol = %symbol))
    )]
    pub async fn resolve(&self, symbol: &str) -> Quote {
        let symbol = normalize_symbol(symbol);
        self.resolve_normalized(&symbol).await
    }

    async fn resolve_normalized(&self, symbol: &str) -> Quote {
        if let Some(q) = self.cached(symbol).await {
            self.observer.cache_hit(symbol);
            return q;
        }
        self.observer.cache_miss(symbol);
        self.resolve_after_miss(symbol).await
    }

    /// Provider chain for a symbol whose cache lookup already missed.
    ///
    /// Concurrent callers for one symbol share a single chain walk and all
    /// receive its result, synthetic quotes included.
    pub(crate) async fn resolve_after_miss(&self, symbol: &str) -> Quote {
        self.flights
            .run(symbol, || self.lead_flight(symbol))
            .await
    }

    async fn lead_flight(&self, symbol: &str) -> Quote {
        // A flight that finished just before this one started may have filled it.
        if let Some(q) = self.cached(symbol).await {
            self.observer.cache_hit(symbol);
            return q;
        }

        match self.fetch_with_fallback(symbol).await {
            Ok(q) => {
                self.store(q.clone()).await;
                q
            }
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(%symbol, errors = ?_e.flatten(), "provider chain exhausted");
                self.synthesize(symbol)
            }
        }
    }

    /// Walk the connector chain in priority order; first valid quote wins.
    pub(crate) async fn fetch_with_fallback(&self, symbol: &str) -> Result<Quote, PulseError> {
        let mut attempted_any = false;
        let mut errors: Vec<PulseError> = Vec::new();

        for c in &self.connectors {
            let Some(qp) = c.as_quote_provider() else {
                continue;
            };
            attempted_any = true;
            let started = Instant::now();
            let result = Self::provider_call_with_timeout(
                c.name(),
                Capability::Quote,
                self.timeout_for(c.as_ref()),
                qp.quote(symbol),
            )
            .await
            .and_then(|q| Self::accept(symbol, c.name(), q));
            self.record_attempt(c.name(), Capability::Quote, &result, started);

            match result {
                Ok(q) => return Ok(q),
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(connector = c.name(), %symbol, error = %e, "provider failed");
                    errors.push(e);
                }
            }
        }

        Err(collapse_errors(Capability::Quote, attempted_any, errors))
    }
}
