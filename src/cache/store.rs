//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with access bookkeeping,
//! TTL expiration, file integrity validation, and multi-policy eviction.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::cache::key::{derive_key, derive_key_with_mtime, ExtractionOptions};
use crate::cache::{eviction, integrity, CacheEntry, CacheStats, EvictionPolicy, StatsSnapshot};
use crate::config::CacheConfig;
use crate::error::Result;

// == Cache Store ==
/// Bounded in-memory store mapping fingerprints to cached extraction results.
///
/// The entry map and the two bookkeeping indexes are kept in lock-step:
/// every key present in one is present in all three. Callers share a store
/// across threads by wrapping it in a single mutex (see [`SharedCache`]);
/// all operations take `&mut self` and complete synchronously.
///
/// [`SharedCache`]: crate::cache::SharedCache
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Fingerprint-to-entry storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Last-access instant per fingerprint, for LRU selection
    last_access: HashMap<String, Instant>,
    /// Access count per fingerprint, for LFU selection
    access_counts: HashMap<String, u64>,
    /// Cumulative performance counters
    stats: CacheStats,
    /// Capacity, TTL, and policy settings
    config: CacheConfig,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore with the given configuration.
    ///
    /// Fails fast on invalid configuration (zero `max_size`); this is the
    /// only fallible operation the store has.
    pub fn new(config: CacheConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            entries: HashMap::new(),
            last_access: HashMap::new(),
            access_counts: HashMap::new(),
            stats: CacheStats::new(),
            config,
        })
    }

    // == Get ==
    /// Retrieves a cached extraction result.
    ///
    /// Returns the payload only if the entry exists, has not expired, and
    /// its source file still matches the recorded size and mtime. Expired
    /// and stale entries are purged on discovery and count as misses, the
    /// same as an absent key.
    ///
    /// # Arguments
    /// * `path` - Source file path
    /// * `tier` - Extraction tier label
    /// * `options` - Extraction options mapping
    pub fn get(&mut self, path: &Path, tier: &str, options: &ExtractionOptions) -> Option<V> {
        let key = derive_key(path, tier, options);

        let (expired, intact) = match self.entries.get(&key) {
            None => {
                self.stats.record_miss();
                return None;
            }
            Some(entry) => (entry.is_expired(), integrity::is_valid(entry)),
        };

        if expired || !intact {
            self.remove_entry(&key);
            self.stats.record_miss();
            if expired {
                debug!("cache entry expired: {}", key);
            } else {
                debug!("source file changed, dropping entry: {}", key);
            }
            return None;
        }

        // Hit: bump the access bookkeeping in both the entry and the indexes
        let entry = self.entries.get_mut(&key)?;
        entry.access_count += 1;
        let payload = entry.payload.clone();
        *self.access_counts.entry(key.clone()).or_insert(0) += 1;
        self.last_access.insert(key, Instant::now());
        self.stats.record_hit();

        Some(payload)
    }

    // == Put ==
    /// Stores an extraction result.
    ///
    /// The source file is stat'ed first; if that fails the result is not
    /// stored and `false` is returned - the cache must never hold an entry
    /// it cannot later validate. A new key arriving at capacity triggers
    /// eviction before insertion. Storing under an existing key replaces
    /// the entry in place.
    ///
    /// # Arguments
    /// * `path` - Source file path
    /// * `tier` - Extraction tier label
    /// * `options` - Extraction options mapping
    /// * `payload` - The extraction result to cache
    /// * `ttl` - Optional TTL (`None` = config default, zero = never expires)
    pub fn put(
        &mut self,
        path: &Path,
        tier: &str,
        options: &ExtractionOptions,
        payload: V,
        ttl: Option<Duration>,
    ) -> bool {
        let metadata = match fs::metadata(path) {
            Ok(m) => m,
            Err(e) => {
                debug!("cannot stat {}, not caching: {}", path.display(), e);
                return false;
            }
        };
        let mtime = match metadata.modified() {
            Ok(t) => t,
            Err(e) => {
                debug!("no mtime for {}, not caching: {}", path.display(), e);
                return false;
            }
        };

        // Record the same mtime observation in the key and the entry
        let mtime_secs = mtime
            .duration_since(std::time::UNIX_EPOCH)
            .ok()
            .map(|d| d.as_secs());
        let key = derive_key_with_mtime(path, tier, options, mtime_secs);

        let is_overwrite = self.entries.contains_key(&key);
        if !is_overwrite && self.entries.len() >= self.config.max_size {
            self.evict_for_capacity();
        }

        let effective_ttl = ttl.unwrap_or(self.config.default_ttl);
        let entry = CacheEntry::new(
            key.clone(),
            payload,
            path.to_path_buf(),
            metadata.len(),
            mtime,
            tier.to_string(),
            effective_ttl,
        );

        self.entries.insert(key.clone(), entry);
        self.access_counts.insert(key.clone(), 1);
        self.last_access.insert(key, Instant::now());

        true
    }

    // == Invalidate ==
    /// Explicitly removes a cached result.
    ///
    /// Returns whether an entry previously existed. Invalidating an absent
    /// key changes nothing.
    pub fn invalidate(&mut self, path: &Path, tier: &str, options: &ExtractionOptions) -> bool {
        let key = derive_key(path, tier, options);
        self.remove_entry(&key)
    }

    // == Clear ==
    /// Removes every entry from the cache.
    ///
    /// The cumulative hit/miss/eviction counters are left untouched.
    pub fn clear(&mut self) {
        let dropped = self.entries.len();
        self.entries.clear();
        self.last_access.clear();
        self.access_counts.clear();
        debug!("cache cleared, dropped {} entries", dropped);
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// If the store is still at or above capacity afterward, one additional
    /// policy-driven eviction runs, so a saturated store of never-expiring
    /// entries still sheds load. Returns the number of expired entries
    /// removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let removed = self.purge_expired(false);
        if self.entries.len() >= self.config.max_size {
            self.evict_for_capacity();
        }
        removed
    }

    // == Stats ==
    /// Returns an immutable snapshot of current size and counters.
    pub fn stats(&self) -> StatsSnapshot {
        StatsSnapshot::new(self.entries.len(), self.config.max_size, &self.stats)
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Internal Helpers ==
    // Invoked from put/cleanup_expired while the caller already holds the
    // store borrow, so they run inside the same critical section.

    /// Removes a key from the entry map and both indexes together,
    /// preserving the lock-step invariant.
    fn remove_entry(&mut self, key: &str) -> bool {
        let existed = self.entries.remove(key).is_some();
        self.last_access.remove(key);
        self.access_counts.remove(key);
        existed
    }

    /// Purges every currently-expired entry.
    ///
    /// Victims are collected in a read-only pass before any removal.
    /// Removals count toward the eviction counter only when performed as
    /// part of capacity-triggered eviction.
    fn purge_expired(&mut self, count_as_evictions: bool) -> usize {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.remove_entry(key);
            if count_as_evictions {
                self.stats.record_eviction();
            }
        }

        expired.len()
    }

    /// Frees capacity for one incoming entry.
    ///
    /// Expired entries are swept first under every policy; the configured
    /// policy then selects a single victim for any residual pressure.
    fn evict_for_capacity(&mut self) {
        let swept = self.purge_expired(true);
        if swept > 0 {
            debug!("eviction sweep removed {} expired entries", swept);
        }
        if self.entries.len() < self.config.max_size {
            return;
        }

        let victim = match self.config.eviction_policy {
            EvictionPolicy::Lru => eviction::lru_victim(&self.last_access),
            EvictionPolicy::Lfu => eviction::lfu_victim(&self.access_counts),
            EvictionPolicy::Ttl => {
                if self.last_access.is_empty() {
                    eviction::lfu_victim(&self.access_counts)
                } else {
                    eviction::lru_victim(&self.last_access)
                }
            }
        };

        if let Some(key) = victim {
            self.remove_entry(&key);
            self.stats.record_eviction();
            debug!(
                "evicted {} under {} policy",
                key, self.config.eviction_policy
            );
        }
    }
}
