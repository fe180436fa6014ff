//! Process-wide Cache Facade
//!
//! Free functions delegating to one lazily-constructed cache store shared
//! by the whole process. The instance is built on first use behind a
//! guaranteed-once primitive, so concurrent first-time callers cannot
//! observe two instances. There is no teardown; the store lives for the
//! process lifetime.

use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::warn;

use crate::cache::{CacheStore, ExtractionOptions, StatsSnapshot};
use crate::config::CacheConfig;

static GLOBAL_CACHE: OnceLock<Mutex<CacheStore<Value>>> = OnceLock::new();

/// Returns the process-wide cache, constructing it on first use.
///
/// Configuration comes from the environment. A misconfigured environment
/// must not take the cache down with it, so invalid values degrade to the
/// defaults with a warning rather than failing the first caller.
fn global_cache() -> &'static Mutex<CacheStore<Value>> {
    GLOBAL_CACHE.get_or_init(|| {
        let config = CacheConfig::from_env().unwrap_or_else(|e| {
            warn!("invalid cache configuration, using defaults: {}", e);
            CacheConfig::default()
        });
        let store = CacheStore::new(config).unwrap_or_else(|e| {
            warn!("invalid cache configuration, using defaults: {}", e);
            CacheStore::new(CacheConfig::default())
                .expect("default cache configuration is valid")
        });
        Mutex::new(store)
    })
}

// == Facade Functions ==

/// Stores an extraction result in the process-wide cache.
///
/// Returns `false` if the source file could not be stat'ed; see
/// [`CacheStore::put`].
pub fn cache_result(
    path: &Path,
    tier: &str,
    options: &ExtractionOptions,
    data: Value,
    ttl: Option<Duration>,
) -> bool {
    global_cache().lock().put(path, tier, options, data, ttl)
}

/// Retrieves an extraction result from the process-wide cache.
pub fn get_cached_result(path: &Path, tier: &str, options: &ExtractionOptions) -> Option<Value> {
    global_cache().lock().get(path, tier, options)
}

/// Removes an extraction result from the process-wide cache.
///
/// Returns whether an entry previously existed.
pub fn invalidate_cache(path: &Path, tier: &str, options: &ExtractionOptions) -> bool {
    global_cache().lock().invalidate(path, tier, options)
}

/// Returns a snapshot of the process-wide cache statistics.
pub fn get_cache_stats() -> StatsSnapshot {
    global_cache().lock().stats()
}

/// Sweeps expired entries from the process-wide cache.
///
/// Returns the number of expired entries removed.
pub fn cleanup_cache() -> usize {
    global_cache().lock().cleanup_expired()
}
