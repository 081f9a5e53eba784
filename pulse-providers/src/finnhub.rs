//! Finnhub `/quote` adapter.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;

use pulse_core::connector::{BatchQuoteProvider, PulseConnector, QuoteProvider};
use pulse_core::{Capability, ProviderConfig, ProviderKind, PulseError, Quote, normalize_symbol};

use crate::http::{Endpoint, fan_out_batch};

/// Public API root.
pub const BASE_URL: &str = "https://finnhub.io/api/v1";
const NAME: &str = ProviderKind::Finnhub.as_str();

/// Compact quote: current, change, percent, high, low, open, previous close.
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    c: Option<f64>,
    d: Option<f64>,
    dp: Option<f64>,
    h: Option<f64>,
    l: Option<f64>,
    o: Option<f64>,
    pc: Option<f64>,
}

/// Connector for Finnhub.
pub struct FinnhubConnector {
    endpoint: Endpoint,
}

impl FinnhubConnector {
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

fn required(field: &str, value: Option<f64>) -> Result<f64, PulseError> {
    value.ok_or_else(|| PulseError::malformed(NAME, format!("missing field {field:?}")))
}

fn to_quote(symbol: &str, resp: &QuoteResponse) -> Result<Quote, PulseError> {
    // Unknown symbols come back as all zeros.
    let price = resp
        .c
        .filter(|c| *c != 0.0)
        .ok_or_else(|| PulseError::malformed(NAME, format!("no current price for {symbol}")))?;
    Quote {
        symbol: normalize_symbol(symbol),
        price,
        change: required("d", resp.d)?,
        change_percent: required("dp", resp.dp)?,
        open: required("o", resp.o)?,
        high: required("h", resp.h)?,
        low: required("l", resp.l)?,
        previous_close: required("pc", resp.pc)?,
        volume: 0,
        timestamp: Utc::now(),
        source: NAME.to_string(),
        is_real_time: true,
    }
    .validate(NAME)
}

impl PulseConnector for FinnhubConnector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn vendor(&self) -> &'static str {
        "Finnhub"
    }

    fn timeout(&self) -> Option<Duration> {
        Some(self.endpoint.timeout())
    }

    fn batch_concurrency(&self) -> usize {
        self.endpoint.batch_concurrency()
    }

    fn as_quote_provider(&self) -> Option<&dyn QuoteProvider> {
        Some(self as &dyn QuoteProvider)
    }

    fn as_batch_quote_provider(&self) -> Option<&dyn BatchQuoteProvider> {
        Some(self as &dyn BatchQuoteProvider)
    }
}

#[async_trait]
impl QuoteProvider for FinnhubConnector {
    async fn quote(&self, symbol: &str) -> Result<Quote, PulseError> {
        let resp: QuoteResponse = self
            .endpoint
            .get_json(
                &["quote"],
                &[("symbol", symbol), ("token", self.endpoint.credential())],
                Capability::Quote,
            )
            .await?;
        to_quote(symbol, &resp)
    }
}

fan_out_batch!(FinnhubConnector);
