//! Memoized decorator stacks, keyed by type name.
//!
//! Each key owns a slot mutex. The map lock is held only long enough to find
//! or create a slot, so a slow computation for one type never blocks lookups
//! for another, while concurrent lookups for the same type wait for the
//! first one and then share its result.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::{Mutex, RwLock};

use crate::decorator::DecoratorType;

/// Decorator stack for one type, general to specific.
pub type Resolution = Arc<[DecoratorType]>;

type Slot = Arc<Mutex<Option<Resolution>>>;

#[derive(Default)]
pub struct PresenterCache {
    slots: RwLock<HashMap<String, Slot>>,
    misses: AtomicUsize,
}

impl PresenterCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached stack for `key`, computing it with `resolve` on a miss.
    ///
    /// `resolve` runs at most once per key until the next [`clear`](Self::clear),
    /// however many threads ask concurrently. A failed computation is not
    /// stored.
    ///
    /// # Errors
    ///
    /// Whatever `resolve` returns.
    pub fn lookup<E>(
        &self,
        key: &str,
        resolve: impl FnOnce() -> Result<Resolution, E>,
    ) -> Result<Resolution, E> {
        let slot = self.slot(key);
        let mut entry = slot.lock();
        if let Some(resolution) = entry.as_ref() {
            return Ok(Arc::clone(resolution));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(key, "presenter cache miss");
        match resolve() {
            Ok(resolution) => {
                *entry = Some(Arc::clone(&resolution));
                Ok(resolution)
            }
            Err(err) => {
                drop(entry);
                self.evict(key, &slot);
                Err(err)
            }
        }
    }

    /// Cached stack for `key`, without computing anything.
    #[must_use]
    pub fn fetch(&self, key: &str) -> Option<Resolution> {
        let slot = Arc::clone(self.slots.read().get(key)?);
        let entry = slot.lock();
        entry.clone()
    }

    /// Number of types with a stored stack. Waits for computations in
    /// progress, but never while holding the map lock.
    #[must_use]
    pub fn len(&self) -> usize {
        let slots: Vec<Slot> = self.slots.read().values().cloned().collect();
        slots.iter().filter(|slot| slot.lock().is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Computations performed since construction.
    #[must_use]
    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    /// Drop every entry. Lookups already holding a slot may finish with the
    /// stack they computed; later lookups recompute.
    pub fn clear(&self) {
        let stale = std::mem::take(&mut *self.slots.write());
        tracing::debug!(entries = stale.len(), "presenter cache cleared");
    }

    fn slot(&self, key: &str) -> Slot {
        if let Some(slot) = self.slots.read().get(key) {
            return Arc::clone(slot);
        }
        Arc::clone(self.slots.write().entry(key.to_string()).or_default())
    }

    // Remove the slot we failed in, unless clear() replaced it or another
    // lookup has filled it (or is filling it) since.
    fn evict(&self, key: &str, slot: &Slot) {
        let mut slots = self.slots.write();
        let unfilled = slot.try_lock().is_some_and(|entry| entry.is_none());
        if unfilled && slots.get(key).is_some_and(|current| Arc::ptr_eq(current, slot)) {
            slots.remove(key);
        }
    }
}

impl fmt::Debug for PresenterCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresenterCache")
            .field("entries", &self.len())
            .field("misses", &self.misses())
            .finish()
    }
}
