//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and evictions.

use serde::Serialize;

// == Cache Stats ==
/// Cumulative cache performance counters.
///
/// Counters survive `clear()`; only the entry maps are emptied.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (absent, expired, or stale)
    pub misses: u64,
    /// Number of entries removed under capacity pressure
    pub evictions: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Eviction ==
    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}

// == Stats Snapshot ==
/// Immutable point-in-time view of the cache, for telemetry consumers.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    /// Current number of entries in the cache
    pub size: usize,
    /// Configured capacity
    pub max_size: usize,
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of evictions
    pub evictions: u64,
    /// Hit rate in the range 0.0-1.0
    pub hit_rate: f64,
    /// Hit rate as a percentage, 0-100
    pub hit_rate_percent: f64,
}

impl StatsSnapshot {
    /// Creates a snapshot from the current size, capacity, and counters.
    pub fn new(size: usize, max_size: usize, stats: &CacheStats) -> Self {
        let hit_rate = stats.hit_rate();
        Self {
            size,
            max_size,
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            hit_rate,
            hit_rate_percent: hit_rate * 100.0,
        }
    }
}
