//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::EvictionPolicy;
use crate::error::{CacheError, Result};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold (must be positive)
    pub max_size: usize,
    /// Default TTL for entries stored without an explicit TTL
    /// (`Duration::ZERO` means entries never expire)
    pub default_ttl: Duration,
    /// Eviction policy applied under capacity pressure
    pub eviction_policy: EvictionPolicy,
    /// Background cleanup task interval
    pub cleanup_interval: Duration,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// Unset or unparseable numeric variables fall back to their defaults.
    /// A present but unrecognized eviction policy name is a configuration
    /// error and fails fast.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_SIZE` - Maximum cache entries (default: 1000)
    /// - `CACHE_DEFAULT_TTL` - Default TTL in seconds, 0 = never expires (default: 3600)
    /// - `CACHE_EVICTION_POLICY` - One of `lru`, `lfu`, `ttl` (default: lru)
    /// - `CACHE_CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    pub fn from_env() -> Result<Self> {
        let eviction_policy = match env::var("CACHE_EVICTION_POLICY") {
            Ok(name) => name.parse()?,
            Err(_) => EvictionPolicy::default(),
        };

        Ok(Self {
            max_size: env::var("CACHE_MAX_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            default_ttl: env::var("CACHE_DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(3600)),
            eviction_policy,
            cleanup_interval: env::var("CACHE_CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(60)),
        })
    }

    /// Validates the configuration.
    ///
    /// A zero `max_size` is the one value the store cannot operate with:
    /// every insert would demand evicting the entry being inserted.
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(CacheError::InvalidConfig(
                "max_size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: 1000,
            default_ttl: Duration::from_secs(3600),
            eviction_policy: EvictionPolicy::default(),
            cleanup_interval: Duration::from_secs(60),
        }
    }
}
