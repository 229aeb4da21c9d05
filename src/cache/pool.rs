//! Entry Pool Module
//!
//! Free-list of retired entry containers, recycled instead of reallocated on
//! every set.

use crate::cache::CacheEntry;

// == Entry Pool ==
/// A free-list of retired [`CacheEntry`] containers.
///
/// `acquire` hands out a recycled container when one is available and only
/// constructs a new one when the free-list is empty. `release` takes the
/// retired entry by value, so an entry is owned by either the store or the
/// pool at any moment and releasing the same entry twice cannot be expressed.
///
/// The free-list never shrinks: its footprint is the high-water mark of
/// simultaneously live entries rather than the current count.
#[derive(Debug, Default)]
pub struct EntryPool<V> {
    /// Retired, reusable entry containers
    free: Vec<CacheEntry<V>>,
}

impl<V> EntryPool<V> {
    // == Constructor ==
    /// Creates a new EntryPool with an empty free-list.
    pub fn new() -> Self {
        Self { free: Vec::new() }
    }

    // == Acquire ==
    /// Returns an entry initialized with the given fields, recycling a free
    /// container when one is available. Always succeeds.
    pub fn acquire(&mut self, value: V, ttl_secs: u64, reset_on_access: bool) -> CacheEntry<V> {
        match self.free.pop() {
            Some(mut entry) => {
                entry.reinit(value, ttl_secs, reset_on_access);
                entry
            }
            None => CacheEntry::new(value, ttl_secs, reset_on_access),
        }
    }

    // == Release ==
    /// Retires an entry: clears its payload and appends the container to the
    /// free-list.
    pub fn release(&mut self, mut entry: CacheEntry<V>) {
        entry.clear();
        self.free.push(entry);
    }

    // == Free Count ==
    /// Returns the number of retired containers currently held.
    pub fn free_count(&self) -> usize {
        self.free.len()
    }
}
