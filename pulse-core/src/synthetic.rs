//! Deterministic last-resort quote generator.
//!
//! Output depends only on the symbol, the calendar day and the minute of
//! `now`, so repeated calls within one minute agree exactly on every price.

use chrono::{DateTime, Timelike, Utc};

use pulse_types::{Quote, SYNTHETIC_SOURCE, SyntheticTable, normalize_symbol};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

const MARKET_OPEN_HOUR: u32 = 9;
const MARKET_CLOSE_HOUR: u32 = 16;
const MARKET_HOURS_MULTIPLIER: f64 = 1.5;
const OFF_HOURS_MULTIPLIER: f64 = 0.3;
const MIN_PRICE: f64 = 0.01;

/// 64-bit FNV-1a over the given bytes.
#[must_use]
pub fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |hash, &b| {
        (hash ^ u64::from(b)).wrapping_mul(FNV_PRIME)
    })
}

/// Value in `[-0.5, 0.5)` derived from a hash.
#[allow(clippy::cast_precision_loss)]
fn centered(hash: u64) -> f64 {
    (hash % 100) as f64 / 100.0 - 0.5
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Builds plausible, clearly-flagged quotes when every provider has failed.
#[derive(Debug, Clone, Default)]
pub struct SyntheticGenerator {
    table: SyntheticTable,
}

impl SyntheticGenerator {
    /// Generator over a custom symbol table.
    #[must_use]
    pub const fn new(table: SyntheticTable) -> Self {
        Self { table }
    }

    /// The symbol table in use.
    #[must_use]
    pub const fn table(&self) -> &SyntheticTable {
        &self.table
    }

    /// Reference price for `symbol`: the table entry, or `100 + fnv1a(symbol) mod 200`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn base_price(&self, symbol: &str) -> f64 {
        let symbol = normalize_symbol(symbol);
        self.table.get(&symbol).map_or_else(
            || 100.0 + (fnv1a(symbol.as_bytes()) % 200) as f64,
            |p| p.base_price,
        )
    }

    fn volatility(&self, symbol: &str) -> f64 {
        self.table
            .get(symbol)
            .map_or(self.table.default_volatility, |p| p.volatility)
    }

    /// Synthesize a quote for `symbol` as of `now`.
    ///
    /// The result always has `price >= 0.01`, `is_real_time == false` and
    /// `source == "enhanced-mock"`.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn synthesize(&self, symbol: &str, now: DateTime<Utc>) -> Quote {
        let symbol = normalize_symbol(symbol);
        let base = self.base_price(&symbol);
        let symbol_hash = fnv1a(symbol.as_bytes());

        let multiplier = if (MARKET_OPEN_HOUR..=MARKET_CLOSE_HOUR).contains(&now.hour()) {
            MARKET_HOURS_MULTIPLIER
        } else {
            OFF_HOURS_MULTIPLIER
        };
        let volatility = self.volatility(&symbol) * multiplier;

        let day_key = format!("{symbol}{}", now.format("%Y%m%d"));
        let minute_key = format!("{symbol}{}", now.timestamp().div_euclid(60));
        let trend = centered(fnv1a(day_key.as_bytes()));
        let noise = centered(fnv1a(minute_key.as_bytes()));

        let change = (noise + trend) * volatility;
        let price = (base + change).max(MIN_PRICE);
        let spread = change.abs() * 0.5;
        let volume = (base * 1000.0 * (1.0 + (symbol_hash % 50) as f64 / 100.0)).floor() as u64;

        Quote {
            symbol,
            price: round2(price),
            change: round2(change),
            change_percent: round2(change / base * 100.0),
            open: round2(base),
            high: round2(price + spread),
            low: round2((price - spread).max(MIN_PRICE)),
            previous_close: round2(base),
            volume,
            timestamp: now,
            source: SYNTHETIC_SOURCE.to_string(),
            is_real_time: false,
        }
    }
}
