//! Pulse-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod capability;
mod config;
mod error;
mod quote;
mod reports;

pub use capability::Capability;
pub use config::{
    ProviderConfig, ProviderKind, PulseConfig, SyntheticProfile, SyntheticTable,
};
pub use error::PulseError;
pub use quote::{Quote, SYNTHETIC_SOURCE, normalize_symbol};
pub use reports::HealthReport;
