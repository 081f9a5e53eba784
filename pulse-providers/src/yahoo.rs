//! Yahoo Finance v8 chart adapter (no credential).

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;

use pulse_core::connector::{BatchQuoteProvider, PulseConnector, QuoteProvider};
use pulse_core::{Capability, ProviderConfig, ProviderKind, PulseError, Quote, normalize_symbol};

use crate::http::{Endpoint, fan_out_batch};

/// Public API root.
pub const BASE_URL: &str = "https://query1.finance.yahoo.com";
const NAME: &str = ProviderKind::YahooFinance.as_str();

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: ChartMeta,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    #[serde(default)]
    regular_market_price: Option<f64>,
    #[serde(default)]
    regular_market_change: Option<f64>,
    #[serde(default)]
    regular_market_change_percent: Option<f64>,
    #[serde(default)]
    regular_market_open: Option<f64>,
    #[serde(default)]
    regular_market_day_high: Option<f64>,
    #[serde(default)]
    regular_market_day_low: Option<f64>,
    #[serde(default)]
    regular_market_volume: Option<u64>,
    #[serde(default)]
    previous_close: Option<f64>,
    #[serde(default)]
    chart_previous_close: Option<f64>,
}

/// Connector for the Yahoo Finance chart endpoint.
pub struct YahooConnector {
    endpoint: Endpoint,
}

impl YahooConnector {
    /// Build from provider configuration. The credential is ignored.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the HTTP client cannot be constructed.
    pub fn new(cfg: &ProviderConfig, default_timeout: Duration) -> Result<Self, PulseError> {
        Ok(Self {
            endpoint: Endpoint::new(NAME, BASE_URL, 5, cfg, default_timeout)?,
        })
    }
}

fn to_quote(symbol: &str, resp: ChartResponse) -> Result<Quote, PulseError> {
    if let Some(err) = resp.chart.error.filter(|e| !e.is_null()) {
        return Err(PulseError::malformed(NAME, format!("chart error: {err}")));
    }
    let meta = resp
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .map(|d| d.meta)
        .ok_or_else(|| PulseError::malformed(NAME, format!("no chart result for {symbol}")))?;
    let price = meta
        .regular_market_price
        .filter(|p| *p != 0.0)
        .ok_or_else(|| PulseError::malformed(NAME, format!("no market price for {symbol}")))?;

    let previous_close = meta.previous_close.or(meta.chart_previous_close);
    let change = meta
        .regular_market_change
        .or_else(|| previous_close.map(|pc| price - pc))
        .unwrap_or_default();
    // Yahoo reports the percentage as a fraction.
    let change_percent = meta.regular_market_change_percent.map_or_else(
        || match previous_close {
            Some(pc) if pc > 0.0 => change / pc * 100.0,
            _ => 0.0,
        },
        |f| f * 100.0,
    );

    Quote {
        symbol: normalize_symbol(symbol),
        price,
        change,
        change_percent,
        open: meta.regular_market_open.unwrap_or_default(),
        high: meta.regular_market_day_high.unwrap_or_default(),
        low: meta.regular_market_day_low.unwrap_or_default(),
        previous_close: previous_close.unwrap_or_default(),
        volume: meta.regular_market_volume.unwrap_or_default(),
        timestamp: Utc::now(),
        source: NAME.to_string(),
        is_real_time: true,
    }
    .validate(NAME)
}

impl PulseConnector for YahooConnector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn vendor(&self) -> &'static str {
        "Yahoo Finance"
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
impl QuoteProvider for YahooConnector {
    async fn quote(&self, symbol: &str) -> Result<Quote, PulseError> {
        let resp: ChartResponse = self
            .endpoint
            .get_json(&["v8", "finance", "chart", symbol], &[], Capability::Quote)
            .await?;
        to_quote(symbol, resp)
    }
}

fan_out_batch!(YahooConnector);
