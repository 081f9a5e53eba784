//! Per-symbol request collapsing.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, MutexGuard, PoisonError};

use tokio::sync::OnceCell;

type Slot<T> = Arc<OnceCell<T>>;

/// Registry of in-flight computations keyed by symbol.
///
/// The first caller for a key runs the computation; callers arriving while it
/// runs wait for and receive the same value. If the leader is cancelled, one
/// of the waiters takes over. A slot is removed once its last caller returns,
/// so the next call after that starts a fresh computation.
pub struct SingleFlight<T> {
    slots: std::sync::Mutex<HashMap<String, Slot<T>>>,
}

impl<T> Default for SingleFlight<T> {
    fn default() -> Self {
        Self {
            slots: std::sync::Mutex::new(HashMap::new()),
        }
    }
}

/// Releases the caller's interest in a slot on drop, including on cancellation.
struct Participant<'a, T> {
    owner: &'a SingleFlight<T>,
    key: &'a str,
    slot: Slot<T>,
}

impl<T> Drop for Participant<'_, T> {
    fn drop(&mut self) {
        let mut slots = self.owner.slots();
        // One reference in the map, one here: nobody else is waiting.
        if Arc::strong_count(&self.slot) <= 2
            && slots
                .get(self.key)
                .is_some_and(|s| Arc::ptr_eq(s, &self.slot))
        {
            slots.remove(self.key);
        }
    }
}

impl<T> SingleFlight<T> {
    fn slots(&self) -> MutexGuard<'_, HashMap<String, Slot<T>>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of keys currently in flight.
    pub fn in_flight(&self) -> usize {
        self.slots().len()
    }
}

impl<T: Clone> SingleFlight<T> {
    /// Run `f` for `key` unless a computation for it is already in flight, in
    /// which case wait for that one and return its value.
    pub async fn run<F, Fut>(&self, key: &str, f: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let slot = Arc::clone(self.slots().entry(key.to_string()).or_default());
        let me = Participant {
            owner: self,
            key,
            slot,
        };
        me.slot.get_or_init(f).await.clone()
    }
}
