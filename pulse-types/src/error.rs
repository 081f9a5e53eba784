use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the pulse workspace.
///
/// Provider-level failures are recovered inside the resolution engine; callers of
/// `resolve`/`resolve_many` never see them. They surface from connectors, the
/// cache seam and builder validation.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PulseError {
    /// The requested capability is not implemented by the target connector.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// Capability label that was requested (e.g. "batch-quote").
        capability: String,
    },

    /// Invalid input argument or configuration.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Network failure, non-2xx status, or rate limiting on a provider.
    #[error("{connector} unavailable: {msg}")]
    ProviderUnavailable {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Provider answered, but the payload had an unexpected shape or failed
    /// the quote invariants.
    #[error("{connector} returned malformed data: {msg}")]
    ProviderMalformed {
        /// Connector name that produced the payload.
        connector: String,
        /// What was wrong with it.
        msg: String,
    },

    /// An individual provider call exceeded the configured timeout.
    #[error("provider timed out: {capability} via {connector}")]
    ProviderTimeout {
        /// Connector name that timed out.
        connector: String,
        /// Capability label (e.g. "quote", "batch-quote").
        capability: String,
    },

    /// The cache backend failed.
    #[error("cache error: {0}")]
    Cache(String),

    /// Every provider in the chain failed; contains the individual failures.
    ///
    /// Internal signal: the engine answers it with a synthetic quote.
    #[error("all providers exhausted: {0:?}")]
    AllProvidersExhausted(Vec<PulseError>),
}

impl PulseError {
    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build a `ProviderUnavailable` error.
    pub fn unavailable(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::ProviderUnavailable {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `ProviderMalformed` error.
    pub fn malformed(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::ProviderMalformed {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(connector: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            connector: connector.into(),
            capability: capability.into(),
        }
    }

    /// True for network-level failures, including timeouts.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::ProviderUnavailable { .. } | Self::ProviderTimeout { .. }
        )
    }

    /// Connector name this error is attributed to, if any.
    #[must_use]
    pub fn connector(&self) -> Option<&str> {
        match self {
            Self::ProviderUnavailable { connector, .. }
            | Self::ProviderMalformed { connector, .. }
            | Self::ProviderTimeout { connector, .. } => Some(connector),
            _ => None,
        }
    }

    /// Flatten nested `AllProvidersExhausted` structures into a plain vector.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllProvidersExhausted(list) => {
                list.into_iter().flat_map(Self::flatten).collect()
            }
            other => vec![other],
        }
    }
}
