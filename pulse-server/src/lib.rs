//! HTTP API for the pulse quote engine.
//!
//! Exposes single and batch quote resolution, a US index summary, health
//! introspection and Prometheus metrics.

pub mod config;
pub mod metrics;
pub mod routes;
pub mod server;

/// Server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
