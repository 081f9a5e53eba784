//! Polygon previous-day aggregate adapter.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;

use pulse_core::connector::{PulseConnector, QuoteProvider};
use pulse_core::{Capability, ProviderConfig, ProviderKind, PulseError, Quote, normalize_symbol};

use crate::http::Endpoint;

/// Public API root.
pub const BASE_URL: &str = "https://api.polygon.io/v2";
const NAME: &str = ProviderKind::Polygon.as_str();

#[derive(Debug, Deserialize)]
struct AggsResponse {
    #[serde(default)]
    results: Vec<Bar>,
}

#[derive(Debug, Deserialize)]
struct Bar {
    o: f64,
    h: f64,
    l: f64,
    c: f64,
    v: Option<f64>,
}

/// Connector for Polygon. Quotes reflect the previous session: the change is
/// measured from that session's open.
pub struct PolygonConnector {
    endpoint: Endpoint,
}

impl PolygonConnector {
    /// Build from provider configuration.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the HTTP client cannot be constructed.
    pub fn new(cfg: &ProviderConfig, default_timeout: Duration) -> Result<Self, PulseError> {
        Ok(Self {
            endpoint: Endpoint::new(NAME, BASE_URL, 5, cfg, default_timeout)?,
        })
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_quote(symbol: &str, resp: &AggsResponse) -> Result<Quote, PulseError> {
    let bar = resp
        .results
        .first()
        .ok_or_else(|| PulseError::malformed(NAME, format!("no aggregate for {symbol}")))?;
    if bar.o <= 0.0 {
        return Err(PulseError::malformed(NAME, "non-positive open"));
    }
    let volume = bar
        .v
        .ok_or_else(|| PulseError::malformed(NAME, format!("no volume for {symbol}")))?;
    let change = bar.c - bar.o;
    Quote {
        symbol: normalize_symbol(symbol),
        price: bar.c,
        change,
        change_percent: change / bar.o * 100.0,
        open: bar.o,
        high: bar.h,
        low: bar.l,
        previous_close: bar.o,
        volume: volume.max(0.0) as u64,
        timestamp: Utc::now(),
        source: NAME.to_string(),
        is_real_time: true,
    }
    .validate(NAME)
}

impl PulseConnector for PolygonConnector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn vendor(&self) -> &'static str {
        "Polygon.io"
    }

    fn timeout(&self) -> Option<Duration> {
        Some(self.endpoint.timeout())
    }

    fn as_quote_provider(&self) -> Option<&dyn QuoteProvider> {
        Some(self as &dyn QuoteProvider)
    }
}

#[async_trait]
impl QuoteProvider for PolygonConnector {
    async fn quote(&self, symbol: &str) -> Result<Quote, PulseError> {
        let resp: AggsResponse = self
            .endpoint
            .get_json(
                &["aggs", "ticker", symbol, "prev"],
                &[("adjusted", "true"), ("apikey", self.endpoint.credential())],
                Capability::Quote,
            )
            .await?;
        to_quote(symbol, &resp)
    }
}
