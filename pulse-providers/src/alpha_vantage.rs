//! Alpha Vantage `GLOBAL_QUOTE` adapter.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;

use pulse_core::connector::{BatchQuoteProvider, PulseConnector, QuoteProvider};
use pulse_core::{Capability, ProviderConfig, ProviderKind, PulseError, Quote, normalize_symbol};

use crate::http::{Endpoint, fan_out_batch, parse_num};

/// Public API root.
pub const BASE_URL: &str = "https://www.alphavantage.co";
const NAME: &str = ProviderKind::AlphaVantage.as_str();

#[derive(Debug, Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<HashMap<String, String>>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

/// Connector for Alpha Vantage. The free tier is slow, so batches fan out
/// with at most three calls in flight.
pub struct AlphaVantageConnector {
    endpoint: Endpoint,
}

impl AlphaVantageConnector {
    /// Build from provider configuration.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the HTTP client cannot be constructed.
    pub fn new(cfg: &ProviderConfig, default_timeout: Duration) -> Result<Self, PulseError> {
        Ok(Self {
            endpoint: Endpoint::new(NAME, BASE_URL, 3, cfg, default_timeout)?,
        })
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_quote(symbol: &str, resp: GlobalQuoteResponse) -> Result<Quote, PulseError> {
    // Throttled answers come back as 200 with a note instead of data.
    if let Some(msg) = resp.note.or(resp.information) {
        return Err(PulseError::unavailable(NAME, msg));
    }
    let gq = resp
        .global_quote
        .filter(|m| !m.is_empty())
        .ok_or_else(|| PulseError::malformed(NAME, "missing Global Quote"))?;
    let field = |key: &str| parse_num(NAME, key, gq.get(key));

    Quote {
        symbol: normalize_symbol(symbol),
        price: field("05. price")?,
        change: field("09. change")?,
        change_percent: field("10. change percent")?,
        open: field("02. open")?,
        high: field("03. high")?,
        low: field("04. low")?,
        previous_close: field("08. previous close")?,
        volume: field("06. volume")?.max(0.0) as u64,
        timestamp: Utc::now(),
        source: NAME.to_string(),
        is_real_time: true,
    }
    .validate(NAME)
}

impl PulseConnector for AlphaVantageConnector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn vendor(&self) -> &'static str {
        "Alpha Vantage"
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
impl QuoteProvider for AlphaVantageConnector {
    async fn quote(&self, symbol: &str) -> Result<Quote, PulseError> {
        let resp: GlobalQuoteResponse = self
            .endpoint
            .get_json(
                &["query"],
                &[
                    ("function", "GLOBAL_QUOTE"),
                    ("symbol", symbol),
                    ("apikey", self.endpoint.credential()),
                ],
                Capability::Quote,
            )
            .await?;
        to_quote(symbol, resp)
    }
}

fan_out_batch!(AlphaVantageConnector);
