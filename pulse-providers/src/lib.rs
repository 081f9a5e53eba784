//! HTTP quote provider adapters for pulse.
//!
//! Each adapter translates one upstream response shape into a `Quote` and
//! reports failures as `ProviderUnavailable`, `ProviderTimeout` or
//! `ProviderMalformed`. Batch calls fan out single-symbol requests over the
//! engine's shared worker pool, bounded by the adapter's concurrency ceiling.
#![warn(missing_docs)]

use std::sync::Arc;
use std::time::Duration;

use pulse_core::{ProviderConfig, ProviderKind, PulseConnector, PulseError};

pub mod alpha_vantage;
pub mod finnhub;
mod http;
pub mod polygon;
pub mod twelve_data;
pub mod yahoo;

pub use alpha_vantage::AlphaVantageConnector;
pub use finnhub::FinnhubConnector;
pub use http::DEMO_CREDENTIAL;
pub use polygon::PolygonConnector;
pub use twelve_data::TwelveDataConnector;
pub use yahoo::YahooConnector;

/// Build one connector from its configuration.
///
/// # Errors
/// Returns `InvalidArg` if the adapter's HTTP client cannot be constructed.
pub fn build_connector(
    cfg: &ProviderConfig,
    default_timeout: Duration,
) -> Result<Arc<dyn PulseConnector>, PulseError> {
    let connector: Arc<dyn PulseConnector> = match cfg.kind {
        ProviderKind::YahooFinance => Arc::new(YahooConnector::new(cfg, default_timeout)?),
        ProviderKind::TwelveData => Arc::new(TwelveDataConnector::new(cfg, default_timeout)?),
        ProviderKind::AlphaVantage => Arc::new(AlphaVantageConnector::new(cfg, default_timeout)?),
        ProviderKind::Finnhub => Arc::new(FinnhubConnector::new(cfg, default_timeout)?),
        ProviderKind::Polygon => Arc::new(PolygonConnector::new(cfg, default_timeout)?),
    };
    Ok(connector)
}

/// Build the ordered connector chain. Order is preserved.
///
/// # Errors
/// Returns the first construction error.
pub fn build_connectors(
    cfgs: &[ProviderConfig],
    default_timeout: Duration,
) -> Result<Vec<Arc<dyn PulseConnector>>, PulseError> {
    cfgs.iter()
        .map(|c| build_connector(c, default_timeout))
        .collect()
}

/// All known providers in default priority order, without credentials.
#[must_use]
pub fn default_provider_configs() -> Vec<ProviderConfig> {
    ProviderKind::DEFAULT_ORDER
        .iter()
        .map(|k| ProviderConfig::new(*k))
        .collect()
}
