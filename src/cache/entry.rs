//! Cache Entry Module
//!
//! Defines the recyclable container for individual cache entries with TTL
//! support.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A single cache entry holding a value and its expiration metadata.
///
/// Entries are reused through the entry pool: a retired entry keeps its
/// container but drops its payload (`value` becomes `None`) so the cache
/// never pins a caller value past its logical lifetime.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value; None once the entry has been retired to the pool
    value: Option<V>,
    /// Lifetime in seconds granted on the last set or qualifying access
    ttl_secs: u64,
    /// Whether a successful read restarts the TTL window
    reset_on_access: bool,
    /// Epoch millisecond when the current TTL window began
    window_start_ms: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new live cache entry with its TTL window starting now.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl_secs` - TTL in seconds
    /// * `reset_on_access` - Whether reads restart the TTL window
    pub fn new(value: V, ttl_secs: u64, reset_on_access: bool) -> Self {
        Self {
            value: Some(value),
            ttl_secs,
            reset_on_access,
            window_start_ms: current_timestamp_ms(),
        }
    }

    // == Reinitialize ==
    /// Reinitializes the entry in place with a fresh value, TTL and reset
    /// policy, restarting the TTL window at now.
    ///
    /// Used both when recycling a pooled entry and when overwriting an
    /// existing key.
    pub fn reinit(&mut self, value: V, ttl_secs: u64, reset_on_access: bool) {
        self.value = Some(value);
        self.ttl_secs = ttl_secs;
        self.reset_on_access = reset_on_access;
        self.window_start_ms = current_timestamp_ms();
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of `now_ms`.
    ///
    /// Boundary condition: an entry is expired once `now_ms` is greater than
    /// or equal to `window_start_ms + ttl_secs * 1000`. This predicate is the
    /// single source of truth shared by the lazy read path and the eager
    /// sweep path.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at_ms()
    }

    // == Touch ==
    /// Applies the access-time side effect of a successful read: restarts the
    /// TTL window at `now_ms` when the entry's reset-on-access flag is set.
    pub fn touch(&mut self, now_ms: u64) {
        if self.reset_on_access {
            self.window_start_ms = now_ms;
        }
    }

    // == Value Access ==
    /// Returns the stored value without any access-time side effect.
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    // == Clear ==
    /// Drops the payload when the entry is retired to the pool.
    pub fn clear(&mut self) {
        self.value = None;
    }

    /// Returns the entry's TTL in seconds.
    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Returns whether reads restart the TTL window.
    pub fn is_reset_on_access(&self) -> bool {
        self.reset_on_access
    }

    /// Returns the epoch millisecond when the current TTL window began.
    pub fn window_start_ms(&self) -> u64 {
        self.window_start_ms
    }

    /// Returns the epoch millisecond at which the current TTL window ends.
    ///
    /// Saturates rather than wrapping for absurdly large TTLs.
    pub fn expires_at_ms(&self) -> u64 {
        self.window_start_ms
            .saturating_add(self.ttl_secs.saturating_mul(1000))
    }

    /// Returns remaining TTL in milliseconds as of `now_ms`.
    ///
    /// Returns 0 if the entry has expired.
    pub fn ttl_remaining_ms(&self, now_ms: u64) -> u64 {
        self.expires_at_ms().saturating_sub(now_ms)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
