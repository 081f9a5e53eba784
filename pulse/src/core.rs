use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use pulse_cache::MemoryQuoteCache;
use pulse_core::{
    AttemptOutcome, Capability, NoopObserver, PulseConfig, PulseConnector, PulseError, Quote,
    QuoteCache, ResolutionObserver, SyntheticGenerator, SyntheticTable, WorkerPool,
};

use crate::single_flight::SingleFlight;

/// Quote resolution engine: ordered provider fallback, freshness cache,
/// pooled batch fan-out and synthetic last-resort quotes.
pub struct Pulse {
    pub(crate) connectors: Vec<Arc<dyn PulseConnector>>,
    pub(crate) cfg: PulseConfig,
    pub(crate) cache: Arc<dyn QuoteCache>,
    pub(crate) pool: WorkerPool,
    pub(crate) synthetic: SyntheticGenerator,
    pub(crate) observer: Arc<dyn ResolutionObserver>,
    pub(crate) flights: SingleFlight<Quote>,
}

/// Builder for constructing a `Pulse` engine with custom configuration.
pub struct PulseBuilder {
    connectors: Vec<Arc<dyn PulseConnector>>,
    cfg: PulseConfig,
    cache: Option<Arc<dyn QuoteCache>>,
    observer: Option<Arc<dyn ResolutionObserver>>,
}

impl Default for PulseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PulseBuilder {
    /// Create a new builder with the default configuration: 30s cache TTL,
    /// 10s provider timeout, five workers, no batch timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: PulseConfig::default(),
            cache: None,
            observer: None,
        }
    }

    /// Register a connector. Registration order is priority order.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn PulseConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Register several connectors, in priority order.
    #[must_use]
    pub fn with_connectors(mut self, cs: impl IntoIterator<Item = Arc<dyn PulseConnector>>) -> Self {
        self.connectors.extend(cs);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: PulseConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// How long resolved quotes stay fresh. Zero disables caching.
    #[must_use]
    pub const fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cfg.cache_ttl = ttl;
        self
    }

    /// Maximum number of cached symbols for the built-in cache.
    #[must_use]
    pub const fn cache_capacity(mut self, capacity: u64) -> Self {
        self.cfg.cache_capacity = capacity;
        self
    }

    /// Timeout applied to each provider call unless the connector overrides it.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Size of the shared worker pool.
    #[must_use]
    pub const fn max_workers(mut self, n: usize) -> Self {
        self.cfg.max_workers = n;
        self
    }

    /// Bound on a single connector's batch call.
    #[must_use]
    pub const fn batch_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.cfg.batch_timeout = timeout;
        self
    }

    /// Symbol table for synthetic quotes.
    #[must_use]
    pub fn synthetic_table(mut self, table: SyntheticTable) -> Self {
        self.cfg.synthetic = table;
        self
    }

    /// Use a custom cache backend instead of the in-process one.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn QuoteCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Receive resolution events.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn ResolutionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Build the engine.
    ///
    /// Connectors registered twice under the same name keep their first position.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `max_workers` or `provider_timeout` is zero, or
    /// when a configured `batch_timeout` is zero.
    pub fn build(self) -> Result<Pulse, PulseError> {
        if self.cfg.max_workers == 0 {
            return Err(PulseError::InvalidArg("max_workers must be at least 1".into()));
        }
        if self.cfg.provider_timeout.is_zero() {
            return Err(PulseError::InvalidArg("provider_timeout must be non-zero".into()));
        }
        if self.cfg.batch_timeout.is_some_and(|t| t.is_zero()) {
            return Err(PulseError::InvalidArg("batch_timeout must be non-zero".into()));
        }

        let mut seen = HashSet::new();
        let connectors = self
            .connectors
            .into_iter()
            .filter(|c| seen.insert(c.name()))
            .collect();

        let cache = self
            .cache
            .unwrap_or_else(|| Arc::new(MemoryQuoteCache::from_config(&self.cfg)));

        Ok(Pulse {
            connectors,
            pool: WorkerPool::new(self.cfg.max_workers),
            synthetic: SyntheticGenerator::new(self.cfg.synthetic.clone()),
            cache,
            observer: self.observer.unwrap_or_else(|| Arc::new(NoopObserver)),
            flights: SingleFlight::default(),
            cfg: self.cfg,
        })
    }
}

impl Pulse {
    /// Start building a new `Pulse` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// let pulse = pulse::Pulse::builder()
    ///     .with_connector(Arc::new(twelve))
    ///     .with_connector(Arc::new(alpha))
    ///     .cache_ttl(Duration::from_secs(30))
    ///     .build()?;
    /// let q = pulse.resolve("aapl").await;
    /// ```
    #[must_use]
    pub fn builder() -> PulseBuilder {
        PulseBuilder::new()
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &PulseConfig {
        &self.cfg
    }

    /// Registered connectors in priority order.
    #[must_use]
    pub fn connectors(&self) -> &[Arc<dyn PulseConnector>] {
        &self.connectors
    }

    /// The shared worker pool.
    #[must_use]
    pub const fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "pulse::core::provider_call_with_timeout",
            skip_all,
            fields(
                connector = connector_name,
                capability = %capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: Capability,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, PulseError>
    where
        Fut: std::future::Future<Output = Result<T, PulseError>>,
    {
        (tokio::time::timeout(timeout, fut).await).unwrap_or_else(|_| {
            Err(PulseError::provider_timeout(
                connector_name,
                capability.as_str(),
            ))
        })
    }

    /// Per-call timeout for `c`.
    pub(crate) fn timeout_for(&self, c: &dyn PulseConnector) -> Duration {
        c.timeout().unwrap_or(self.cfg.provider_timeout)
    }

    /// Report one finished provider attempt to the observer.
    pub(crate) fn record_attempt<T>(
        &self,
        connector: &str,
        capability: Capability,
        result: &Result<T, PulseError>,
        started: Instant,
    ) {
        self.observer.provider_attempt(
            connector,
            capability,
            AttemptOutcome::of(result),
            started.elapsed(),
        );
    }

    /// Live cache entry for a normalized symbol. Cache failures count as a miss.
    pub(crate) async fn cached(&self, symbol: &str) -> Option<Quote> {
        match self.cache.get(symbol).await {
            Ok(hit) => hit,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(%symbol, error = %_e, "cache read failed");
                None
            }
        }
    }

    /// Write a provider quote to the cache. Failures are logged and ignored.
    pub(crate) async fn store(&self, quote: Quote) {
        debug_assert!(!quote.is_synthetic());
        if let Err(_e) = self.cache.put(quote).await {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_e, "cache write failed");
        }
    }

    /// Accept a provider quote for `symbol`: enforce the quote invariants and
    /// key it by the requested symbol.
    pub(crate) fn accept(symbol: &str, connector: &str, quote: Quote) -> Result<Quote, PulseError> {
        let mut quote = quote.validate(connector)?;
        if quote.symbol != symbol {
            quote.symbol = symbol.to_string();
        }
        Ok(quote)
    }

    /// Synthetic quote for a normalized symbol as of now. Never cached.
    pub(crate) fn synthesize(&self, symbol: &str) -> Quote {
        self.observer.synthesized(symbol);
        #[cfg(feature = "tracing")]
        tracing::info!(%symbol, "all providers failed; serving synthetic quote");
        self.synthetic.synthesize(symbol, Utc::now())
    }
}
