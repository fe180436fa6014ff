//! Error types for the extraction result cache
//!
//! Provides unified error handling using thiserror.
//!
//! Only configuration problems are surfaced as errors. Data-path conditions
//! (missing files, changed files, expired entries) degrade to cache misses
//! and are never reported through this type.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the extraction result cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Invalid configuration value supplied at construction time
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Eviction policy name not recognized
    #[error("Unknown eviction policy: {0}")]
    UnknownPolicy(String),
}

// == Result Type Alias ==
/// Convenience Result type for the extraction result cache.
pub type Result<T> = std::result::Result<T, CacheError>;
