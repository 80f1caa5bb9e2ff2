//! Observer registration and notification.

use super::progress::EvolutionProgress;
use super::types::EvolutionObserver;
use crate::chromosome::Score;
use crate::generation::Generation;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Handle returned by [`ObserverRegistry::add`], used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

#[derive(Default)]
struct Registered {
    next_id: u64,
    observers: Vec<(ObserverId, Arc<dyn EvolutionObserver>)>,
}

/// Lock-guarded list of observers.
///
/// [`notify`](Self::notify) copies the list while holding the lock and calls
/// the observers from that copy with the lock released. An observer may
/// therefore add or remove observers, itself included, from inside its
/// callback; the change takes effect from the next notification.
#[derive(Default)]
pub struct ObserverRegistry {
    inner: Mutex<Registered>,
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.len())
            .finish()
    }
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Registered> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers `observer` after all existing ones.
    ///
    /// Registering the same `Arc` twice returns the existing id.
    pub fn add(&self, observer: Arc<dyn EvolutionObserver>) -> ObserverId {
        let mut inner = self.lock();
        if let Some((id, _)) = inner
            .observers
            .iter()
            .find(|(_, o)| std::ptr::addr_eq(Arc::as_ptr(o), Arc::as_ptr(&observer)))
        {
            return *id;
        }
        let id = ObserverId(inner.next_id);
        inner.next_id += 1;
        inner.observers.push((id, observer));
        id
    }

    /// Unregisters by id. Returns `false` if it was not registered.
    pub fn remove(&self, id: ObserverId) -> bool {
        let mut inner = self.lock();
        let before = inner.observers.len();
        inner.observers.retain(|(other, _)| *other != id);
        inner.observers.len() != before
    }

    pub fn len(&self) -> usize {
        self.lock().observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The observers in registration order, as of this call.
    pub fn snapshot(&self) -> Vec<Arc<dyn EvolutionObserver>> {
        self.lock()
            .observers
            .iter()
            .map(|(_, o)| Arc::clone(o))
            .collect()
    }

    /// Calls every observer registered at the start of the pass.
    pub fn notify(
        &self,
        generation: &Generation,
        top_score_so_far: Score,
        is_last_generation: bool,
        progress: &EvolutionProgress,
    ) {
        for observer in self.snapshot() {
            observer.on_generation_created(
                generation,
                top_score_so_far,
                is_last_generation,
                progress,
            );
        }
    }
}
