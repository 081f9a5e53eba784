//! Pulse resolves current market quotes across a prioritized chain of providers.
//!
//! Overview
//! - Tries connectors that implement the `pulse_core` contracts in registration
//!   order, each call bounded by a timeout; the first valid quote wins.
//! - Keeps resolved quotes in a short-lived freshness cache to bound provider load.
//! - Collapses concurrent lookups of one symbol into a single provider chain walk.
//! - Resolves batches through native batch connectors first, then fans out
//!   single-symbol resolution over one shared bounded worker pool.
//! - Never fails: when every provider is down, rate-limited or returns garbage,
//!   callers get a deterministic synthetic quote flagged `is_real_time == false`.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use pulse::Pulse;
//!
//! let pulse = Pulse::builder()
//!     .with_connectors(pulse_providers::build_connectors(&cfgs, timeout)?)
//!     .build()?;
//!
//! let one = pulse.resolve("AAPL").await;
//! let many = pulse.resolve_many(&["AAPL", "MSFT", "ZZZZ"]).await;
//! assert_eq!(many.len(), 3);
//! ```
#![warn(missing_docs)]

mod core;
mod router;
mod single_flight;

pub use crate::core::{Pulse, PulseBuilder};
pub use pulse_core::connector::{BatchQuoteProvider, QuoteProvider};
pub use pulse_core::{
    AttemptOutcome, Capability, HealthReport, NoopObserver, ProviderConfig, ProviderKind,
    PulseConfig, PulseConnector, PulseError, Quote, QuoteCache, ResolutionObserver,
    SYNTHETIC_SOURCE, SyntheticGenerator, SyntheticTable, WorkerPool, normalize_symbol,
};
