//! Hooks fired while quotes are resolved.

use std::time::Duration;

use pulse_types::{Capability, PulseError};

/// How one provider attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttemptOutcome {
    /// A valid quote (or a non-empty batch) came back.
    Success,
    /// Network failure, non-2xx status or rate limiting.
    Unavailable,
    /// The call exceeded its timeout.
    Timeout,
    /// The provider answered with unusable data.
    Malformed,
    /// Any other failure (unsupported capability, empty batch).
    Failed,
}

impl AttemptOutcome {
    /// Classify a provider result.
    #[must_use]
    pub fn of<T>(result: &Result<T, PulseError>) -> Self {
        match result {
            Ok(_) => Self::Success,
            Err(PulseError::ProviderTimeout { .. }) => Self::Timeout,
            Err(PulseError::ProviderUnavailable { .. }) => Self::Unavailable,
            Err(PulseError::ProviderMalformed { .. }) => Self::Malformed,
            Err(_) => Self::Failed,
        }
    }

    /// Label suitable for metric dimensions.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Unavailable => "unavailable",
            Self::Timeout => "timeout",
            Self::Malformed => "malformed",
            Self::Failed => "failed",
        }
    }
}

/// Receives resolution events. Every method defaults to a no-op.
pub trait ResolutionObserver: Send + Sync {
    /// A live cache entry answered the request.
    fn cache_hit(&self, symbol: &str) {
        let _ = symbol;
    }

    /// No live cache entry existed for the symbol.
    fn cache_miss(&self, symbol: &str) {
        let _ = symbol;
    }

    /// One provider call finished.
    fn provider_attempt(
        &self,
        connector: &str,
        capability: Capability,
        outcome: AttemptOutcome,
        elapsed: Duration,
    ) {
        let _ = (connector, capability, outcome, elapsed);
    }

    /// Every provider failed and a synthetic quote was produced.
    fn synthesized(&self, symbol: &str) {
        let _ = symbol;
    }
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ResolutionObserver for NoopObserver {}
