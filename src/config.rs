//! Configuration Module
//!
//! Construction options for the cache, with defaulted fields validated once
//! at construction.

use std::env;

use serde::Serialize;

use crate::error::{CacheError, Result};

/// Cache construction options.
///
/// All values have sensible defaults and can also be loaded from environment
/// variables.
#[derive(Debug, Clone, Serialize)]
pub struct CacheConfig {
    /// Default TTL in seconds for entries without an explicit TTL
    pub ttl: u64,
    /// Whether a successful read restarts an entry's TTL window by default
    pub is_reset_on_access: bool,
    /// Interval in seconds between background sweep passes
    pub check_interval: u64,
    /// Number of entries a sweep pass examines between yields
    pub sweep_chunk_size: usize,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 180)
    /// - `RESET_ON_ACCESS` - Reset TTL window on read (default: true)
    /// - `CHECK_INTERVAL` - Sweep frequency in seconds (default: 10)
    /// - `SWEEP_CHUNK_SIZE` - Entries per sweep batch (default: 128)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ttl: env::var("DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.ttl),
            is_reset_on_access: env::var("RESET_ON_ACCESS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.is_reset_on_access),
            check_interval: env::var("CHECK_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.check_interval),
            sweep_chunk_size: env::var("SWEEP_CHUNK_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.sweep_chunk_size),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// - `CacheError::InvalidTtl` if `ttl` is zero
    /// - `CacheError::InvalidCheckInterval` if `check_interval` is zero
    /// - `CacheError::InvalidChunkSize` if `sweep_chunk_size` is zero
    pub fn validate(&self) -> Result<()> {
        if self.ttl == 0 {
            return Err(CacheError::InvalidTtl);
        }
        if self.check_interval == 0 {
            return Err(CacheError::InvalidCheckInterval);
        }
        if self.sweep_chunk_size == 0 {
            return Err(CacheError::InvalidChunkSize);
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: 180,
            is_reset_on_access: true,
            check_interval: 10,
            sweep_chunk_size: 128,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, 180);
        assert!(config.is_reset_on_access);
        assert_eq!(config.check_interval, 10);
        assert_eq!(config.sweep_chunk_size, 128);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("DEFAULT_TTL");
        env::remove_var("RESET_ON_ACCESS");
        env::remove_var("CHECK_INTERVAL");
        env::remove_var("SWEEP_CHUNK_SIZE");

        let config = CacheConfig::from_env();
        assert_eq!(config.ttl, 180);
        assert!(config.is_reset_on_access);
        assert_eq!(config.check_interval, 10);
        assert_eq!(config.sweep_chunk_size, 128);
    }

    #[test]
    fn test_config_zero_ttl_rejected() {
        let config = CacheConfig {
            ttl: 0,
            ..CacheConfig::default()
        };
        assert_eq!(config.validate(), Err(CacheError::InvalidTtl));
    }

    #[test]
    fn test_config_zero_interval_rejected() {
        let config = CacheConfig {
            check_interval: 0,
            ..CacheConfig::default()
        };
        assert_eq!(config.validate(), Err(CacheError::InvalidCheckInterval));
    }

    #[test]
    fn test_config_zero_chunk_size_rejected() {
        let config = CacheConfig {
            sweep_chunk_size: 0,
            ..CacheConfig::default()
        };
        assert_eq!(config.validate(), Err(CacheError::InvalidChunkSize));
    }
}
