use std::collections::{HashMap, HashSet};
use std::time::Instant;

use pulse_core::{AttemptOutcome, Capability, Quote, normalize_symbol};

use crate::Pulse;
use crate::router::util::dedup_symbols;

impl Pulse {
    /// Resolve quotes for many symbols. Total: the result has exactly one
    /// entry per distinct normalized input symbol.
    ///
    /// Strategy:
    /// - symbols with a live cache entry are answered from the cache;
    /// - batch-capable connectors are tried in priority order with the rest,
    ///   and the first one returning at least one valid quote wins (its
    ///   quotes are cached, symbols it missed get synthetic quotes);
    /// - if no batch connector yields anything, every remaining symbol is
    ///   resolved individually over the shared worker pool.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "pulse::batch::resolve_many",
            skip(self, symbols),
            fields(symbols = symbols.len()),
        )
    )]
    pub async fn resolve_many<S: AsRef<str>>(&self, symbols: &[S]) -> HashMap<String, Quote> {
        let wanted = dedup_symbols(symbols);
        let mut out: HashMap<String, Quote> = HashMap::with_capacity(wanted.len());

        let mut pending = Vec::with_capacity(wanted.len());
        for symbol in wanted {
            if let Some(q) = self.cached(&symbol).await {
                self.observer.cache_hit(&symbol);
                out.insert(symbol, q);
            } else {
                self.observer.cache_miss(&symbol);
                pending.push(symbol);
            }
        }
        if pending.is_empty() {
            return out;
        }

        if let Some(found) = self.fetch_batch_first_non_empty(&pending).await {
            for (symbol, q) in found {
                self.store(q.clone()).await;
                out.insert(symbol, q);
            }
            for symbol in pending {
                if !out.contains_key(&symbol) {
                    let q = self.synthesize(&symbol);
                    out.insert(symbol, q);
                }
            }
            return out;
        }

        let resolved = self
            .pool
            .run(pending, self.cfg.max_workers, |symbol| async move {
                let q = self.resolve_after_miss(&symbol).await;
                (symbol, q)
            })
            .await;
        out.extend(resolved);
        out
    }

    /// Try each batch-capable connector in priority order; the first one that
    /// returns at least one valid quote for a requested symbol wins.
    async fn fetch_batch_first_non_empty(
        &self,
        symbols: &[String],
    ) -> Option<HashMap<String, Quote>> {
        let requested: HashSet<&str> = symbols.iter().map(String::as_str).collect();

        for c in &self.connectors {
            let Some(bp) = c.as_batch_quote_provider() else {
                continue;
            };
            let started = Instant::now();
            let fut = bp.quotes(symbols, &self.pool);
            let result = match self.cfg.batch_timeout {
                Some(t) => {
                    Self::provider_call_with_timeout(c.name(), Capability::BatchQuote, t, fut).await
                }
                None => fut.await,
            };
            let accepted = result.map(|batch| {
                batch
                    .into_iter()
                    .filter_map(|(sym, q)| {
                        let sym = normalize_symbol(&sym);
                        if !requested.contains(sym.as_str()) {
                            return None;
                        }
                        Self::accept(&sym, c.name(), q).ok().map(|q| (sym, q))
                    })
                    .collect::<HashMap<_, _>>()
            });

            let outcome = match &accepted {
                Ok(found) if found.is_empty() => AttemptOutcome::Failed,
                other => AttemptOutcome::of(other),
            };
            self.observer.provider_attempt(
                c.name(),
                Capability::BatchQuote,
                outcome,
                started.elapsed(),
            );

            match accepted {
                Ok(found) if !found.is_empty() => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        connector = c.name(),
                        served = found.len(),
                        requested = symbols.len(),
                        "batch accepted"
                    );
                    return Some(found);
                }
                Ok(_) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(connector = c.name(), "batch returned nothing usable");
                }
                Err(_e) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(connector = c.name(), error = %_e, "batch failed");
                }
            }
        }
        None
    }
}
