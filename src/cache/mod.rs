//! Cache Module
//!
//! Provides in-memory caching of extraction results with TTL expiration,
//! file integrity validation, and LRU/LFU/TTL eviction.

use std::sync::Arc;

use parking_lot::Mutex;

mod entry;
mod eviction;
mod integrity;
mod key;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use eviction::EvictionPolicy;
pub use integrity::MTIME_TOLERANCE;
pub use key::{derive_key, ExtractionOptions};
pub use stats::{CacheStats, StatsSnapshot};
pub use store::CacheStore;

// == Shared Handle ==
/// A store behind the single coarse-grained lock callers share across
/// threads. Every operation holds the lock for its full duration, so the
/// entry map, both bookkeeping indexes, and the stats counters form one
/// critical section.
pub type SharedCache<V> = Arc<Mutex<CacheStore<V>>>;
