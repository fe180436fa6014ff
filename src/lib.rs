//! Metacache - a thread-safe in-memory result cache for metadata extraction
//!
//! Sits in front of caller-supplied extraction operations keyed by
//! (file path, tier, options). Provides TTL expiration, source-file
//! integrity validation, and LRU/LFU/TTL eviction. Callers compute on miss
//! and store the result with `put`; the cache never performs extraction
//! itself.

pub mod cache;
pub mod config;
pub mod error;
pub mod global;
pub mod tasks;

pub use cache::{
    CacheEntry, CacheStore, EvictionPolicy, ExtractionOptions, SharedCache, StatsSnapshot,
};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use global::{
    cache_result, cleanup_cache, get_cache_stats, get_cached_result, invalidate_cache,
};
pub use tasks::{spawn_cleanup_task, CleanupHandle};
