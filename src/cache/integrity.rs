//! Integrity Validation Module
//!
//! Detects stale cache entries by comparing the source file's live size and
//! modification time against the values recorded at cache-write time.

use std::fs;
use std::time::Duration;

use crate::cache::CacheEntry;

// == Tolerance ==
/// Maximum mtime drift treated as "unchanged".
///
/// Filesystems round modification times to their own granularity, so an
/// exact comparison would invalidate entries whose files were never touched.
pub const MTIME_TOLERANCE: Duration = Duration::from_millis(100);

// == Validation ==
/// Checks whether a cache entry still matches its source file.
///
/// Returns true iff the file exists, its current size equals the recorded
/// size, and its modification time is within [`MTIME_TOLERANCE`] of the
/// recorded one. Any stat failure reads as "changed": the entry can no
/// longer be validated and must not be served.
pub fn is_valid<V>(entry: &CacheEntry<V>) -> bool {
    let metadata = match fs::metadata(&entry.source_path) {
        Ok(m) => m,
        Err(_) => return false,
    };

    if metadata.len() != entry.file_size {
        return false;
    }

    let mtime = match metadata.modified() {
        Ok(t) => t,
        Err(_) => return false,
    };

    // Absolute drift in either direction
    let drift = match mtime.duration_since(entry.file_mtime) {
        Ok(d) => d,
        Err(e) => e.duration(),
    };

    drift < MTIME_TOLERANCE
}
