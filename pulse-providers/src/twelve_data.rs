//! Twelve Data `/price` adapter. The endpoint only knows the last price.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use pulse_core::connector::{BatchQuoteProvider, PulseConnector, QuoteProvider};
use pulse_core::{Capability, ProviderConfig, ProviderKind, PulseError, Quote};

use crate::http::{Endpoint, fan_out_batch, parse_num};

/// Public API root.
pub const BASE_URL: &str = "https://api.twelvedata.com";
const NAME: &str = ProviderKind::TwelveData.as_str();

#[derive(Debug, Deserialize)]
struct PriceResponse {
    price: Option<String>,
    status: Option<String>,
    message: Option<String>,
}

/// Connector for Twelve Data.
pub struct TwelveDataConnector {
    endpoint: Endpoint,
}

impl TwelveDataConnector {
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

fn to_quote(symbol: &str, resp: &PriceResponse) -> Result<Quote, PulseError> {
    if resp.status.as_deref() == Some("error") {
        return Err(PulseError::unavailable(
            NAME,
            resp.message.clone().unwrap_or_else(|| "error status".into()),
        ));
    }
    let price = parse_num(NAME, "price", resp.price.as_ref())?;
    Quote::price_only(symbol, price, NAME).validate(NAME)
}

impl PulseConnector for TwelveDataConnector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn vendor(&self) -> &'static str {
        "Twelve Data"
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
impl QuoteProvider for TwelveDataConnector {
    async fn quote(&self, symbol: &str) -> Result<Quote, PulseError> {
        let resp: PriceResponse = self
            .endpoint
            .get_json(
                &["price"],
                &[("symbol", symbol), ("apikey", self.endpoint.credential())],
                Capability::Quote,
            )
            .await?;
        to_quote(symbol, &resp)
    }
}

fan_out_batch!(TwelveDataConnector);
