//! TTL Mem Cache - An in-process expiring key/value cache
//!
//! Provides a key/value cache whose entries expire after a configurable
//! time-to-live (TTL), with pooled entry containers and a background sweep
//! task that reclaims expired entries.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;
pub mod ttl_cache;

pub use cache::{CacheStats, CacheStore};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use tasks::SweepScheduler;
pub use ttl_cache::TtlCache;
