use chrono::Utc;
use pulse_core::Quote;

pub fn by_symbol(s: &str) -> Option<Quote> {
    match s {
        "AAPL" => Some(q("AAPL", 190.00, 188.00, 52_000_000)),
        "MSFT" => Some(q("MSFT", 420.00, 418.00, 21_000_000)),
        "NVDA" => Some(q("NVDA", 1000.00, 990.00, 40_000_000)),
        "GOOGL" => Some(q("GOOGL", 150.00, 148.00, 25_000_000)),
        "KO" => Some(q("KO", 60.00, 59.50, 12_000_000)),
        "BTC-USD" => Some(q("BTC-USD", 65_000.00, 64_000.00, 30_000)),
        "^GSPC" => Some(q("^GSPC", 5_000.00, 4_950.00, 0)),
        "^IXIC" => Some(q("^IXIC", 16_000.00, 16_100.00, 0)),
        "^DJI" => Some(q("^DJI", 38_000.00, 38_000.00, 0)),
        _ => None,
    }
}

fn q(sym: &str, price: f64, prev: f64, volume: u64) -> Quote {
    let change = price - prev;
    Quote {
        symbol: sym.to_string(),
        price,
        change,
        change_percent: change / prev * 100.0,
        open: prev,
        high: price.max(prev),
        low: price.min(prev),
        previous_close: prev,
        volume,
        timestamp: Utc::now(),
        source: "pulse-mock".to_string(),
        is_real_time: true,
    }
}
