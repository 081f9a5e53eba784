//! pulse-core
//!
//! Traits and building blocks shared across the pulse workspace.
//!
//! - `connector`: the `PulseConnector` trait and its capability provider traits.
//! - `cache`: the `QuoteCache` seam the engine reads and writes through.
//! - `pool`: the shared bounded `WorkerPool` used for batch fan-out.
//! - `batch`: per-symbol fan-out for connectors without a native batch endpoint.
//! - `observer`: hooks fired while a quote is being resolved.
//! - `synthetic`: the deterministic last-resort quote generator.
//!
//! Async runtime (Tokio)
//! ---------------------
//! The pool, the per-call timeouts and the fan-out helpers are built on Tokio
//! primitives and must run under a Tokio 1.x runtime.
#![warn(missing_docs)]

pub mod batch;
pub mod cache;
/// Connector capability traits and the primary `PulseConnector` interface.
pub mod connector;
pub mod observer;
pub mod pool;
pub mod synthetic;

pub use batch::fan_out_quotes;
pub use cache::QuoteCache;
pub use connector::{BatchQuoteProvider, PulseConnector, QuoteProvider};
pub use observer::{AttemptOutcome, NoopObserver, ResolutionObserver};
pub use pool::WorkerPool;
pub use synthetic::{SyntheticGenerator, fnv1a};

pub use pulse_types::*;
