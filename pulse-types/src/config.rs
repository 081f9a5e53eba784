//! Configuration types shared by the engine, the connectors and the server.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Known upstream quote providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    /// Yahoo Finance v8 chart metadata (no credential).
    YahooFinance,
    /// Twelve Data last-price endpoint.
    TwelveData,
    /// Alpha Vantage `GLOBAL_QUOTE`.
    AlphaVantage,
    /// Finnhub compact quote.
    Finnhub,
    /// Polygon previous-day aggregate.
    Polygon,
}

impl ProviderKind {
    /// Priority order used when no explicit provider list is configured.
    pub const DEFAULT_ORDER: [Self; 5] = [
        Self::YahooFinance,
        Self::TwelveData,
        Self::AlphaVantage,
        Self::Finnhub,
        Self::Polygon,
    ];

    /// Stable provider identifier; also the `source` of quotes it produces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::YahooFinance => "yahoo-finance",
            Self::TwelveData => "twelve-data",
            Self::AlphaVantage => "alpha-vantage",
            Self::Finnhub => "finnhub",
            Self::Polygon => "polygon",
        }
    }
}

/// One entry of the ordered provider chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Which adapter to build.
    pub kind: ProviderKind,
    /// API key or token; adapters fall back to `"demo"` when absent.
    pub credential: Option<String>,
    /// Override of the provider's base URL (proxies, tests).
    pub base_url: Option<String>,
    /// Per-call timeout override; `PulseConfig::provider_timeout` otherwise.
    pub timeout: Option<Duration>,
    /// Override of the provider's batch concurrency ceiling.
    pub batch_concurrency: Option<usize>,
}

impl ProviderConfig {
    /// Provider entry with defaults for everything but the kind.
    #[must_use]
    pub const fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            credential: None,
            base_url: None,
            timeout: None,
            batch_concurrency: None,
        }
    }

    /// Attach a credential.
    #[must_use]
    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }

    /// Point the adapter at a different base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

/// Base price and volatility used by the synthetic generator for one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyntheticProfile {
    /// Reference price around which synthetic quotes move.
    pub base_price: f64,
    /// Magnitude of the per-minute movement before the market-hours multiplier.
    pub volatility: f64,
}

/// Symbol table for the synthetic generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticTable {
    /// Known symbols.
    pub profiles: HashMap<String, SyntheticProfile>,
    /// Volatility for symbols absent from `profiles`.
    pub default_volatility: f64,
}

impl SyntheticTable {
    /// Look up the profile of a (normalized) symbol.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<SyntheticProfile> {
        self.profiles.get(symbol).copied()
    }

    /// Insert or replace a profile.
    #[must_use]
    pub fn with_profile(mut self, symbol: &str, base_price: f64, volatility: f64) -> Self {
        self.profiles.insert(
            symbol.to_ascii_uppercase(),
            SyntheticProfile {
                base_price,
                volatility,
            },
        );
        self
    }
}

impl Default for SyntheticTable {
    fn default() -> Self {
        const DEFAULTS: [(&str, f64, f64); 15] = [
            ("AAPL", 178.23, 2.5),
            ("MSFT", 378.45, 2.0),
            ("GOOGL", 145.67, 2.8),
            ("TSLA", 234.56, 8.0),
            ("NVDA", 168.45, 5.0),
            ("AMZN", 145.32, 3.5),
            ("META", 320.15, 4.0),
            ("NFLX", 425.67, 3.0),
            ("AMD", 98.45, 4.5),
            ("INTC", 45.67, 2.5),
            ("SPY", 415.23, 15.0),
            ("QQQ", 365.45, 25.0),
            ("DIA", 340.12, 50.0),
            ("BTC-USD", 45000.00, 500.0),
            ("ETH-USD", 3200.00, 50.0),
        ];
        let profiles = DEFAULTS
            .iter()
            .map(|&(sym, base_price, volatility)| {
                (
                    sym.to_string(),
                    SyntheticProfile {
                        base_price,
                        volatility,
                    },
                )
            })
            .collect();
        Self {
            profiles,
            default_volatility: 2.0,
        }
    }
}

/// Global configuration for the `Pulse` engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PulseConfig {
    /// How long a resolved quote stays fresh in the cache. Zero disables caching.
    pub cache_ttl: Duration,
    /// Maximum number of cached symbols.
    pub cache_capacity: u64,
    /// Timeout for individual provider calls.
    pub provider_timeout: Duration,
    /// Size of the shared worker pool used for batch fan-out.
    pub max_workers: usize,
    /// Optional bound on a single connector's whole batch call.
    pub batch_timeout: Option<Duration>,
    /// Symbol table for synthetic fallback quotes.
    pub synthetic: SyntheticTable,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(30),
            cache_capacity: 10_000,
            provider_timeout: Duration::from_secs(10),
            max_workers: 5,
            batch_timeout: None,
            synthetic: SyntheticTable::default(),
        }
    }
}
