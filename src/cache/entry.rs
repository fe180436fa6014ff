//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support and
//! the source-file metadata recorded for later integrity validation.

use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime};

// == Cache Entry ==
/// Represents a single cached extraction result with its metadata.
///
/// The payload type is generic; the store never inspects it.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// Fingerprint identifying this unit of work
    pub key: String,
    /// The cached extraction result
    pub payload: V,
    /// Creation instant
    pub created_at: Instant,
    /// Expiration instant, None = no expiration
    pub expires_at: Option<Instant>,
    /// Number of times this entry has been served
    pub access_count: u64,
    /// Source file this result was extracted from
    pub source_path: PathBuf,
    /// Source file size in bytes at cache-write time
    pub file_size: u64,
    /// Source file modification time at cache-write time
    pub file_mtime: SystemTime,
    /// Extraction tier label (e.g. "free", "premium")
    pub tier: String,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry.
    ///
    /// A zero `ttl` means the entry never expires.
    ///
    /// # Arguments
    /// * `key` - Fingerprint the entry is stored under
    /// * `payload` - The extraction result to cache
    /// * `source_path` - File the result was extracted from
    /// * `file_size` - Source file size in bytes, as stat'ed at write time
    /// * `file_mtime` - Source file modification time, as stat'ed at write time
    /// * `tier` - Extraction tier label
    /// * `ttl` - Time-to-live (zero = never expires)
    pub fn new(
        key: String,
        payload: V,
        source_path: PathBuf,
        file_size: u64,
        file_mtime: SystemTime,
        tier: String,
        ttl: Duration,
    ) -> Self {
        let now = Instant::now();
        let expires_at = if ttl.is_zero() {
            None
        } else {
            now.checked_add(ttl)
        };

        Self {
            key,
            payload,
            created_at: now,
            expires_at,
            access_count: 1,
            source_path,
            file_size,
            file_mtime,
            tier,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is considered expired when the current
    /// instant is greater than or equal to the expiration instant, so an
    /// entry whose TTL has fully elapsed is immediately expired.
    ///
    /// # Returns
    /// - `true` if the entry has a TTL and the current instant >= expiration instant
    /// - `false` if the entry has no TTL (never expires) or TTL hasn't elapsed
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => Instant::now() >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns remaining TTL, or None if no expiration is set.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` if the entry has expired (TTL elapsed)
    /// - `Some(remaining)` if the entry has TTL and hasn't expired
    /// - `None` if the entry has no TTL (never expires)
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(Instant::now()))
    }
}
