//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and sweep
//! reclamations.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key absent or expired)
    pub misses: u64,
    /// Number of expired entries reclaimed by sweep passes
    pub swept: u64,
    /// Current number of live entries in the cache
    pub live_entries: usize,
    /// Current number of retired containers held by the entry pool
    pub pool_free: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Sweep ==
    /// Increments the sweep reclamation counter.
    pub fn record_swept(&mut self) {
        self.swept += 1;
    }
}
