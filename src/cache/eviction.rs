//! Eviction Policy Module
//!
//! Defines the eviction policies and the victim selection used when the
//! store is at capacity.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::error::CacheError;

// == Eviction Policy ==
/// Rule used to choose which entry to remove when the store is full.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EvictionPolicy {
    /// Least Recently Used - evict the entry accessed longest ago
    #[default]
    Lru,
    /// Least Frequently Used - evict the entry with the fewest accesses
    Lfu,
    /// TTL-first - purge expired entries, then fall back to LRU (or LFU if
    /// the last-access index is empty)
    Ttl,
}

impl FromStr for EvictionPolicy {
    type Err = CacheError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "lru" => Ok(EvictionPolicy::Lru),
            "lfu" => Ok(EvictionPolicy::Lfu),
            "ttl" => Ok(EvictionPolicy::Ttl),
            _ => Err(CacheError::UnknownPolicy(name.to_string())),
        }
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvictionPolicy::Lru => write!(f, "lru"),
            EvictionPolicy::Lfu => write!(f, "lfu"),
            EvictionPolicy::Ttl => write!(f, "ttl"),
        }
    }
}

// == Victim Selection ==
/// Returns the key with the globally minimum last-access time.
///
/// Ties break on the lexicographically smallest key so repeated runs pick
/// the same victim. O(n) read-only scan; the caller performs the removal.
pub(crate) fn lru_victim(last_access: &HashMap<String, Instant>) -> Option<String> {
    last_access
        .iter()
        .min_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)))
        .map(|(key, _)| key.clone())
}

/// Returns the key with the globally minimum access count.
///
/// Ties break on the lexicographically smallest key.
pub(crate) fn lfu_victim(access_counts: &HashMap<String, u64>) -> Option<String> {
    access_counts
        .iter()
        .min_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)))
        .map(|(key, _)| key.clone())
}
