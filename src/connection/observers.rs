//! Registry of status-change callbacks.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::ConnectionStatus;

/// Callback invoked with the new status after a change.
pub type StatusCallback = Box<dyn Fn(&ConnectionStatus) + Send + Sync>;

/// Handle returned on registration, used to remove the callback again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

#[derive(Default)]
struct Entries {
    next_id: u64,
    callbacks: Vec<(ObserverId, Arc<dyn Fn(&ConnectionStatus) + Send + Sync>)>,
}

/// Ordered set of status observers.
#[derive(Default)]
pub struct ObserverRegistry {
    entries: Mutex<Entries>,
}

impl ObserverRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a callback, returning the id to remove it with.
    pub fn register(&self, callback: StatusCallback) -> ObserverId {
        let mut entries = self.lock();
        let id = ObserverId(entries.next_id);
        entries.next_id += 1;
        entries.callbacks.push((id, Arc::from(callback)));
        id
    }

    /// Remove a callback. Returns false if it was not registered.
    pub fn remove(&self, id: ObserverId) -> bool {
        let mut entries = self.lock();
        let before = entries.callbacks.len();
        entries.callbacks.retain(|(entry_id, _)| *entry_id != id);
        entries.callbacks.len() != before
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.lock().callbacks.len()
    }

    /// Whether no callbacks are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invoke every callback, in registration order.
    ///
    /// The registry is not locked while callbacks run, so a callback may
    /// register or remove observers; those changes apply from the next round.
    pub fn notify(&self, status: &ConnectionStatus) {
        let callbacks: Vec<_> =
            self.lock().callbacks.iter().map(|(_, callback)| callback.clone()).collect();
        for callback in callbacks {
            callback(status);
        }
    }

    // A panicking callback must not take every later notification down with it.
    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry").field("observers", &self.len()).finish()
    }
}
