use std::collections::HashSet;

use pulse_core::{Capability, PulseError, normalize_symbol};

/// Normalize symbols and drop duplicates, keeping first-seen order.
pub fn dedup_symbols<S: AsRef<str>>(symbols: &[S]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(symbols.len());
    symbols
        .iter()
        .map(|s| normalize_symbol(s.as_ref()))
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

/// Collapse a set of provider errors into a single outcome.
///
/// Rules:
/// - If `attempted_any` is false → `Unsupported(capability)`.
/// - Else → `AllProvidersExhausted(errors)`.
pub fn collapse_errors(
    capability: Capability,
    attempted_any: bool,
    errors: Vec<PulseError>,
) -> PulseError {
    if !attempted_any {
        return PulseError::unsupported(capability);
    }
    PulseError::AllProvidersExhausted(errors)
}
