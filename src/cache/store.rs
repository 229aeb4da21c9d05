//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with TTL expiration and
//! pooled entry containers.

use std::collections::HashMap;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::{CacheEntry, CacheStats, EntryPool};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Main cache storage with TTL expiration and entry recycling.
///
/// Expiration is lazy on the read path: an expired entry is treated as
/// absent but left in place for the background sweep to reclaim. The store
/// owns every live entry; retired entries move into the pool's free-list.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Free-list of retired entry containers
    pool: EntryPool<V>,
    /// Performance statistics
    stats: CacheStats,
    /// Default TTL in seconds for entries without an explicit TTL
    default_ttl: u64,
    /// Default reset-on-access policy for entries without an explicit one
    reset_on_access: bool,
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore with the given defaults.
    ///
    /// # Arguments
    /// * `default_ttl` - Default TTL in seconds for entries without explicit TTL
    /// * `reset_on_access` - Default policy for restarting the TTL window on reads
    pub fn new(default_ttl: u64, reset_on_access: bool) -> Self {
        Self {
            entries: HashMap::new(),
            pool: EntryPool::new(),
            stats: CacheStats::new(),
            default_ttl,
            reset_on_access,
        }
    }

    // == Set ==
    /// Stores a key-value pair with optional per-call TTL and reset policy.
    ///
    /// If the key already exists (expired or not), the entry is reinitialized
    /// in place and its TTL window restarts at now. Otherwise a container is
    /// acquired from the pool and inserted.
    ///
    /// # Arguments
    /// * `key` - The key to store (must be non-empty)
    /// * `value` - The value to store
    /// * `ttl` - Optional TTL in seconds (uses the default when None)
    /// * `reset_on_access` - Optional reset policy (uses the default when None)
    ///
    /// # Errors
    /// - `CacheError::EmptyKey` if `key` is empty
    /// - `CacheError::InvalidTtl` if an explicit TTL of zero is supplied
    pub fn set(
        &mut self,
        key: &str,
        value: V,
        ttl: Option<u64>,
        reset_on_access: Option<bool>,
    ) -> Result<()> {
        if key.is_empty() {
            return Err(CacheError::EmptyKey);
        }
        if ttl == Some(0) {
            return Err(CacheError::InvalidTtl);
        }

        let effective_ttl = ttl.unwrap_or(self.default_ttl);
        let effective_reset = reset_on_access.unwrap_or(self.reset_on_access);

        if let Some(entry) = self.entries.get_mut(key) {
            entry.reinit(value, effective_ttl, effective_reset);
        } else {
            let entry = self.pool.acquire(value, effective_ttl, effective_reset);
            self.entries.insert(key.to_string(), entry);
        }

        Ok(())
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns None when the key is absent or its entry has expired, even if
    /// the expired entry has not been swept yet. On a live hit, restarts the
    /// entry's TTL window when its reset-on-access flag is set, then returns
    /// a clone of the value.
    ///
    /// # Arguments
    /// * `key` - The key to retrieve
    pub fn get(&mut self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        let now = current_timestamp_ms();
        match self.entries.get_mut(key) {
            Some(entry) if !entry.is_expired(now) => {
                entry.touch(now);
                self.stats.record_hit();
                entry.value().cloned()
            }
            _ => {
                // Absent, or expired and awaiting sweep
                self.stats.record_miss();
                None
            }
        }
    }

    // == Delete ==
    /// Removes an entry by key and retires its container to the pool.
    ///
    /// Returns false (a no-op, not an error) when the key is absent.
    ///
    /// # Arguments
    /// * `key` - The key to delete
    pub fn delete(&mut self, key: &str) -> bool {
        match self.entries.remove(key) {
            Some(entry) => {
                self.pool.release(entry);
                true
            }
            None => false,
        }
    }

    // == Clear ==
    /// Removes every entry and retires all containers to the pool.
    pub fn clear(&mut self) {
        for (_, entry) in self.entries.drain() {
            self.pool.release(entry);
        }
    }

    // == Iteration ==
    /// Calls `f` with each live key.
    ///
    /// Expiration is judged against a single timestamp captured at call
    /// start; expired-but-unswept entries are skipped and never mutated.
    pub fn for_each_key<F>(&self, mut f: F)
    where
        F: FnMut(&str),
    {
        let now = current_timestamp_ms();
        for (key, entry) in &self.entries {
            if entry.is_expired(now) {
                continue;
            }
            f(key);
        }
    }

    /// Calls `f` with each live key and a reference to its value.
    ///
    /// Reads through this traversal do not restart TTL windows.
    pub fn for_each_entry<F>(&self, mut f: F)
    where
        F: FnMut(&str, &V),
    {
        let now = current_timestamp_ms();
        for (key, entry) in &self.entries {
            if entry.is_expired(now) {
                continue;
            }
            if let Some(value) = entry.value() {
                f(key, value);
            }
        }
    }

    /// Returns a snapshot of all live keys.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        self.for_each_key(|key| keys.push(key.to_string()));
        keys
    }

    /// Returns a snapshot of all live values.
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        let mut values = Vec::new();
        self.for_each_entry(|_, value| values.push(value.clone()));
        values
    }

    // == Length ==
    /// Returns the current number of live entries, skipping entries that
    /// have expired but not yet been swept.
    pub fn len(&self) -> usize {
        let now = current_timestamp_ms();
        self.entries
            .values()
            .filter(|entry| !entry.is_expired(now))
            .count()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // == Defaults ==
    /// Returns the default TTL in seconds.
    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    /// Updates the default TTL in seconds.
    ///
    /// # Errors
    /// - `CacheError::InvalidTtl` if `ttl` is zero
    pub fn set_default_ttl(&mut self, ttl: u64) -> Result<()> {
        if ttl == 0 {
            return Err(CacheError::InvalidTtl);
        }
        self.default_ttl = ttl;
        Ok(())
    }

    /// Returns the default reset-on-access policy.
    pub fn is_reset_on_access(&self) -> bool {
        self.reset_on_access
    }

    /// Updates the default reset-on-access policy.
    pub fn set_reset_on_access(&mut self, reset: bool) {
        self.reset_on_access = reset;
    }

    // == Sweep Support ==
    /// Returns a snapshot of every stored key, live or expired.
    ///
    /// A sweep pass walks this snapshot so its traversal stays stable while
    /// the pass yields between batches.
    pub fn sweep_keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Retires the named entry if it has expired as of `now_ms`.
    ///
    /// Removal from the map and release to the pool happen in the same step,
    /// so an entry is never reachable from both collections.
    ///
    /// Returns true if an entry was reclaimed.
    pub fn remove_expired_step(&mut self, key: &str, now_ms: u64) -> bool {
        let expired = self
            .entries
            .get(key)
            .map(|entry| entry.is_expired(now_ms))
            .unwrap_or(false);

        if expired {
            if let Some(entry) = self.entries.remove(key) {
                self.pool.release(entry);
                self.stats.record_swept();
                return true;
            }
        }
        false
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.live_entries = self.len();
        stats.pool_free = self.pool.free_count();
        stats
    }

    // == Pool Occupancy ==
    /// Returns the number of retired containers held by the entry pool.
    pub fn pool_free_count(&self) -> usize {
        self.pool.free_count()
    }
}
