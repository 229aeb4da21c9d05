//! Cache Module
//!
//! Provides in-memory key/value caching with TTL expiration and pooled
//! entry containers.

mod entry;
mod pool;
mod stats;
mod store;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use pool::EntryPool;
pub use stats::CacheStats;
pub use store::CacheStore;
