//! TTL Cache Facade
//!
//! Public surface combining the cache store, entry pool and sweep scheduler
//! with instance-wide default TTL and reset-on-access configuration.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::cache::{CacheStats, CacheStore};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::tasks::SweepScheduler;

// == TTL Cache ==
/// In-process key/value cache whose entries expire after a time-to-live.
///
/// Per-call TTL and reset-on-access overrides default to the instance-wide
/// configuration. A background sweep task reclaims expired entries that are
/// never read again; their containers are recycled through an entry pool.
///
/// The store and pool are exclusively owned by one cache instance and
/// entries are never exposed by reference; values come back as clones.
///
/// Must be constructed within a Tokio runtime (the sweep task is spawned at
/// construction). Calling any method after [`destroy`](TtlCache::destroy) is
/// a programming error with unspecified results; it is documented rather
/// than guarded at runtime.
#[derive(Debug)]
pub struct TtlCache<V> {
    /// Combined store, pool and defaults, shared with the sweep task
    store: Arc<RwLock<CacheStore<V>>>,
    /// Recurring sweep task handle
    sweeper: SweepScheduler,
}

impl<V> TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructors ==
    /// Creates a new cache from the given configuration and starts its sweep
    /// task.
    ///
    /// # Errors
    /// Returns a precondition error when the configuration is invalid (zero
    /// TTL, interval or chunk size).
    pub fn new(config: CacheConfig) -> Result<Self> {
        config.validate()?;

        let store = Arc::new(RwLock::new(CacheStore::new(
            config.ttl,
            config.is_reset_on_access,
        )));
        let sweeper = SweepScheduler::spawn(
            store.clone(),
            config.check_interval,
            config.sweep_chunk_size,
        );

        Ok(Self { store, sweeper })
    }

    /// Creates a new cache with the default configuration
    /// (180s TTL, reset on access, 10s sweep interval).
    pub fn with_defaults() -> Self {
        // The default configuration is statically valid
        Self::new(CacheConfig::default()).expect("default configuration is valid")
    }

    // == Get ==
    /// Retrieves the value for `key`.
    ///
    /// Returns None when the key is absent or its entry has expired, even if
    /// not yet swept. On a live hit the entry's TTL window restarts when its
    /// reset-on-access flag is set.
    pub async fn get(&self, key: &str) -> Option<V> {
        self.store.write().await.get(key)
    }

    // == Set ==
    /// Stores `value` under `key` using the instance defaults for TTL and
    /// reset policy.
    ///
    /// Overwrites any existing value and restarts the entry's TTL window.
    ///
    /// # Errors
    /// - `CacheError::EmptyKey` if `key` is empty
    pub async fn set(&self, key: &str, value: V) -> Result<()> {
        self.set_with(key, value, None, None).await
    }

    /// Stores `value` under `key` with optional per-call TTL and reset
    /// policy overrides. `None` overrides resolve to the instance defaults.
    ///
    /// # Errors
    /// - `CacheError::EmptyKey` if `key` is empty
    /// - `CacheError::InvalidTtl` if an explicit TTL of zero is supplied
    pub async fn set_with(
        &self,
        key: &str,
        value: V,
        ttl: Option<u64>,
        reset_on_access: Option<bool>,
    ) -> Result<()> {
        self.store.write().await.set(key, value, ttl, reset_on_access)
    }

    // == Delete ==
    /// Removes `key` from the cache, recycling its entry container.
    ///
    /// Returns false (a no-op, not an error) when the key is absent.
    pub async fn delete(&self, key: &str) -> bool {
        self.store.write().await.delete(key)
    }

    // == Clear ==
    /// Removes every entry, recycling all containers.
    pub async fn clear(&self) {
        self.store.write().await.clear();
    }

    // == Iteration ==
    /// Calls `f` with each live key. Expired-but-unswept entries are
    /// skipped; TTL windows are not restarted.
    pub async fn for_each_key<F>(&self, f: F)
    where
        F: FnMut(&str),
    {
        self.store.read().await.for_each_key(f);
    }

    /// Calls `f` with each live key and a reference to its value. Expired
    /// entries are skipped; TTL windows are not restarted.
    pub async fn for_each_entry<F>(&self, f: F)
    where
        F: FnMut(&str, &V),
    {
        self.store.read().await.for_each_entry(f);
    }

    /// Returns a snapshot of all live keys.
    pub async fn keys(&self) -> Vec<String> {
        self.store.read().await.keys()
    }

    /// Returns a snapshot of all live values.
    pub async fn values(&self) -> Vec<V> {
        self.store.read().await.values()
    }

    // == Size ==
    /// Returns the number of live entries as of the call, skipping entries
    /// that have expired but not yet been swept.
    pub async fn size(&self) -> usize {
        self.store.read().await.len()
    }

    // == Configuration ==
    /// Returns the default TTL in seconds applied when `set` is called
    /// without an explicit TTL.
    pub async fn default_ttl(&self) -> u64 {
        self.store.read().await.default_ttl()
    }

    /// Updates the default TTL in seconds.
    ///
    /// # Errors
    /// - `CacheError::InvalidTtl` if `ttl` is zero
    pub async fn set_default_ttl(&self, ttl: u64) -> Result<()> {
        self.store.write().await.set_default_ttl(ttl)
    }

    /// Returns the default reset-on-access policy.
    pub async fn is_reset_on_access(&self) -> bool {
        self.store.read().await.is_reset_on_access()
    }

    /// Updates the default reset-on-access policy.
    ///
    /// Only entries set afterwards are affected; existing entries keep the
    /// policy they were stored with.
    pub async fn set_reset_on_access(&self, reset: bool) {
        self.store.write().await.set_reset_on_access(reset);
    }

    /// Returns the interval in seconds between sweep passes.
    pub fn check_interval(&self) -> u64 {
        self.sweeper.check_interval()
    }

    /// Updates the sweep interval, re-arming the scheduler without touching
    /// store state.
    ///
    /// # Errors
    /// - `CacheError::InvalidCheckInterval` if `secs` is zero
    pub fn set_check_interval(&self, secs: u64) -> Result<()> {
        if secs == 0 {
            return Err(CacheError::InvalidCheckInterval);
        }
        self.sweeper.set_check_interval(secs);
        Ok(())
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    /// Returns the number of retired containers held by the entry pool.
    pub async fn pool_free_count(&self) -> usize {
        self.store.read().await.pool_free_count()
    }

    // == Destroy ==
    /// Tears the cache down: cancels the sweep task so no further passes
    /// occur. Idempotent.
    ///
    /// Using the cache after this call is a documented programming error;
    /// results are unspecified but never a crash. Dropping the cache also
    /// cancels the sweep task.
    pub fn destroy(&self) {
        self.sweeper.destroy();
    }
}
