use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::PulseError;

/// Source label carried by quotes produced by the synthetic generator.
pub const SYNTHETIC_SOURCE: &str = "enhanced-mock";

/// Normalized snapshot of a symbol's price at resolution time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Uppercased ticker.
    pub symbol: String,
    /// Last price. Always `> 0` once accepted by the engine.
    pub price: f64,
    /// Absolute change versus the reference price.
    pub change: f64,
    /// Change in percent.
    pub change_percent: f64,
    /// Session open.
    pub open: f64,
    /// Session high.
    pub high: f64,
    /// Session low.
    pub low: f64,
    /// Previous close.
    pub previous_close: f64,
    /// Session volume.
    pub volume: u64,
    /// When the quote was resolved (not exchange time).
    pub timestamp: DateTime<Utc>,
    /// Provider identifier, or [`SYNTHETIC_SOURCE`].
    #[serde(rename = "dataSource", alias = "source")]
    pub source: String,
    /// False only for synthetic quotes.
    pub is_real_time: bool,
}

impl Quote {
    /// Quote that only knows a last price: all reference prices collapse onto it.
    #[must_use]
    pub fn price_only(symbol: &str, price: f64, source: &str) -> Self {
        Self {
            symbol: normalize_symbol(symbol),
            price,
            change: 0.0,
            change_percent: 0.0,
            open: price,
            high: price,
            low: price,
            previous_close: price,
            volume: 0,
            timestamp: Utc::now(),
            source: source.to_string(),
            is_real_time: true,
        }
    }

    /// True when produced by the synthetic generator.
    #[must_use]
    pub fn is_synthetic(&self) -> bool {
        !self.is_real_time && self.source == SYNTHETIC_SOURCE
    }

    /// Check the quote invariants, attributing failures to `connector`.
    ///
    /// # Errors
    /// Returns `ProviderMalformed` when the price is not a positive finite number
    /// or the symbol is empty.
    pub fn validate(self, connector: &str) -> Result<Self, PulseError> {
        if self.symbol.is_empty() {
            return Err(PulseError::malformed(connector, "quote without symbol"));
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(PulseError::malformed(
                connector,
                format!("non-positive price {} for {}", self.price, self.symbol),
            ));
        }
        Ok(self)
    }
}

/// Canonical form of a ticker: trimmed and ASCII-uppercased.
#[must_use]
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_ascii_uppercase()
}
