//! Cache Key Derivation Module
//!
//! Builds deterministic fingerprints for cached extraction results from
//! (file path, tier, options, file modification time).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;

use sha2::{Digest, Sha256};

/// Extraction options passed alongside a file path and tier.
///
/// A BTreeMap keeps serialization key-ordered, so two option maps with the
/// same contents always produce the same fingerprint regardless of how they
/// were built.
pub type ExtractionOptions = BTreeMap<String, serde_json::Value>;

// == Key Derivation ==
/// Derives the cache fingerprint for an extraction request.
///
/// The key is the SHA-256 hex digest of the canonicalized
/// (path, tier, options, mtime) tuple. The file's modification time is
/// stat'ed best-effort: if the file cannot be read the key is derived
/// without it. The mtime is folded in truncated to whole seconds, so a
/// sub-second touch keeps the key stable and leaves staleness detection to
/// the integrity check.
///
/// # Arguments
/// * `path` - Source file path
/// * `tier` - Extraction tier label
/// * `options` - Extraction options mapping
pub fn derive_key(path: &Path, tier: &str, options: &ExtractionOptions) -> String {
    derive_key_with_mtime(path, tier, options, stat_mtime_secs(path))
}

/// Derives the fingerprint with an already-known mtime.
///
/// Used by `put`, which has just stat'ed the file and must record the same
/// observation in both the key and the entry metadata.
pub(crate) fn derive_key_with_mtime(
    path: &Path,
    tier: &str,
    options: &ExtractionOptions,
    mtime_secs: Option<u64>,
) -> String {
    let mut hasher = Sha256::new();

    hasher.update(path.to_string_lossy().as_bytes());
    hasher.update([0]);
    hasher.update(tier.as_bytes());
    hasher.update([0]);

    // BTreeMap serializes with sorted keys, giving a canonical form
    let options_json = serde_json::to_string(options).unwrap_or_default();
    hasher.update(options_json.as_bytes());

    if let Some(secs) = mtime_secs {
        hasher.update([0]);
        hasher.update(secs.to_le_bytes());
    }

    format!("{:x}", hasher.finalize())
}

/// Returns the file's modification time in whole seconds since the epoch,
/// or None if the file cannot be stat'ed.
pub(crate) fn stat_mtime_secs(path: &Path) -> Option<u64> {
    let mtime = fs::metadata(path).ok()?.modified().ok()?;
    mtime.duration_since(UNIX_EPOCH).ok().map(|d| d.as_secs())
}
