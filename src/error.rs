//! Error types for the cache
//!
//! Provides unified error handling using thiserror.
//!
//! Every variant is a precondition violation: the failing call returns
//! before any state mutation, so the store and pool are never left
//! half-updated. Looking up or deleting an absent key is a logical no-op,
//! not an error, and is reported through `Option`/`bool` return values
//! instead.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CacheError {
    /// Key must be a non-empty string
    #[error("Key must be a non-empty string")]
    EmptyKey,

    /// TTL must be a positive number of seconds
    #[error("TTL must be a positive number of seconds")]
    InvalidTtl,

    /// Sweep check interval must be a positive number of seconds
    #[error("Check interval must be a positive number of seconds")]
    InvalidCheckInterval,

    /// Sweep chunk size must be positive
    #[error("Sweep chunk size must be positive")]
    InvalidChunkSize,
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
