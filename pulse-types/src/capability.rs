use core::fmt;
use serde::{Deserialize, Serialize};

/// Capability labels for routing, errors, and telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Point-in-time quote for a single symbol.
    Quote,
    /// Quotes for a set of symbols in one provider call.
    BatchQuote,
}

impl Capability {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quote => "quote",
            Self::BatchQuote => "batch-quote",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Capability> for String {
    fn from(c: Capability) -> Self {
        c.as_str().to_string()
    }
}
