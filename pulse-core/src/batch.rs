//! Batch fan-out for connectors without a native multi-symbol endpoint.

use std::collections::HashMap;
use std::time::Duration;

use pulse_types::Quote;

use crate::connector::QuoteProvider;
use crate::pool::WorkerPool;

/// Resolve `symbols` through `provider` one call per symbol.
///
/// At most `min(ceiling, pool.size())` calls run at once, each bounded by
/// `timeout`. Failed, timed-out and invalid quotes are dropped, so the result
/// may be partial or empty.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "pulse::core::fan_out_quotes",
        skip(provider, symbols, pool),
        fields(symbols = symbols.len(), ceiling = ceiling),
    )
)]
pub async fn fan_out_quotes(
    connector: &'static str,
    provider: &dyn QuoteProvider,
    symbols: &[String],
    pool: &WorkerPool,
    ceiling: usize,
    timeout: Duration,
) -> HashMap<String, Quote> {
    let results = pool
        .run(symbols.iter().cloned(), ceiling, |symbol| async move {
            match tokio::time::timeout(timeout, provider.quote(&symbol)).await {
                Ok(Ok(q)) => match q.validate(connector) {
                    Ok(q) => Some((symbol, q)),
                    Err(_e) => {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(%symbol, error = %_e, "dropping invalid quote");
                        None
                    }
                },
                Ok(Err(_e)) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(%symbol, error = %_e, "batch member failed");
                    None
                }
                Err(_) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(%symbol, "batch member timed out");
                    None
                }
            }
        })
        .await;
    results.into_iter().flatten().collect()
}
