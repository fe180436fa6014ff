//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify the cache's correctness properties: key
//! determinism, round-trip storage, capacity enforcement, and statistics
//! accuracy.

use proptest::prelude::*;
use serde_json::json;
use std::collections::HashMap;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::cache::key::derive_key_with_mtime;
use crate::cache::{CacheStore, EvictionPolicy, ExtractionOptions};
use crate::config::CacheConfig;

// == Test Configuration ==
const TEST_MAX_SIZE: usize = 100;
const FIXTURE_FILES: usize = 8;

const TIERS: [&str; 4] = ["free", "starter", "premium", "super"];

// == Fixtures ==
/// A directory of real source files the cache can stat and validate.
struct Fixtures {
    _dir: TempDir,
    files: Vec<PathBuf>,
}

fn fixtures() -> Fixtures {
    let dir = TempDir::new().unwrap();
    let files = (0..FIXTURE_FILES)
        .map(|i| {
            let path = dir.path().join(format!("sample_{}.dcm", i));
            std::fs::write(&path, format!("fixture contents {}", i)).unwrap();
            path
        })
        .collect();
    Fixtures { _dir: dir, files }
}

fn test_store() -> CacheStore<String> {
    CacheStore::new(CacheConfig {
        max_size: TEST_MAX_SIZE,
        ..CacheConfig::default()
    })
    .unwrap()
}

fn no_options() -> ExtractionOptions {
    ExtractionOptions::new()
}

// == Strategies ==
fn option_key_strategy() -> impl Strategy<Value = String> {
    "[a-z_]{1,12}"
}

fn options_strategy() -> impl Strategy<Value = ExtractionOptions> {
    prop::collection::btree_map(
        option_key_strategy(),
        "[a-zA-Z0-9]{0,8}".prop_map(|s| json!(s)),
        0..4,
    )
}

/// One cache operation over the fixture files and tier labels.
#[derive(Debug, Clone)]
enum CacheOp {
    Put { file: usize, tier: usize },
    Get { file: usize, tier: usize },
    Invalidate { file: usize, tier: usize },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    let indexes = (0..FIXTURE_FILES, 0..TIERS.len());
    prop_oneof![
        indexes
            .clone()
            .prop_map(|(file, tier)| CacheOp::Put { file, tier }),
        indexes
            .clone()
            .prop_map(|(file, tier)| CacheOp::Get { file, tier }),
        indexes.prop_map(|(file, tier)| CacheOp::Invalidate { file, tier }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Key determinism: identical inputs always derive the identical
    // fingerprint, and changing any single option value changes it.
    #[test]
    fn prop_key_determinism(
        path in "/[a-z]{1,8}/[a-z]{1,8}\\.[a-z]{2,4}",
        tier in prop::sample::select(TIERS.to_vec()),
        options in options_strategy(),
        extra_key in option_key_strategy(),
        mtime in prop::option::of(0u64..2_000_000_000),
    ) {
        let path = PathBuf::from(path);
        let key1 = derive_key_with_mtime(&path, tier, &options, mtime);
        let key2 = derive_key_with_mtime(&path, tier, &options, mtime);
        prop_assert_eq!(&key1, &key2, "identical inputs must derive identical keys");

        // Perturb one option value
        let mut changed = options.clone();
        changed.insert(extra_key, json!("perturbed-value"));
        let key3 = derive_key_with_mtime(&path, tier, &changed, mtime);
        prop_assert_ne!(&key1, &key3, "changed options must derive a different key");
    }

    // Round-trip: after a successful put against an unchanged file, get
    // returns exactly the stored payload.
    #[test]
    fn prop_roundtrip_storage(
        file in 0..FIXTURE_FILES,
        tier in 0..TIERS.len(),
        options in options_strategy(),
        payload in "[a-zA-Z0-9 ]{1,64}",
    ) {
        let fx = fixtures();
        let mut store = test_store();

        prop_assert!(store.put(&fx.files[file], TIERS[tier], &options, payload.clone(), None));

        let retrieved = store.get(&fx.files[file], TIERS[tier], &options);
        prop_assert_eq!(retrieved, Some(payload), "round-trip payload mismatch");
    }

    // Invalidation: a removed entry is gone, and invalidating an absent
    // key reports false.
    #[test]
    fn prop_invalidate_removes_entry(
        file in 0..FIXTURE_FILES,
        tier in 0..TIERS.len(),
        payload in "[a-zA-Z0-9 ]{1,64}",
    ) {
        let fx = fixtures();
        let mut store = test_store();
        let path = &fx.files[file];

        store.put(path, TIERS[tier], &no_options(), payload, None);
        prop_assert!(store.invalidate(path, TIERS[tier], &no_options()));
        prop_assert!(store.get(path, TIERS[tier], &no_options()).is_none());
        prop_assert!(!store.invalidate(path, TIERS[tier], &no_options()));
    }

    // Capacity: for any sequence of puts, the store never exceeds max_size.
    // Each put carries a distinct option value so every insert is a new key.
    #[test]
    fn prop_capacity_enforcement(
        policy in prop::sample::select(vec![
            EvictionPolicy::Lru,
            EvictionPolicy::Lfu,
            EvictionPolicy::Ttl,
        ]),
        puts in prop::collection::vec((0..FIXTURE_FILES, 0..TIERS.len()), 1..60),
    ) {
        let fx = fixtures();
        let max_size = 5;
        let mut store: CacheStore<String> = CacheStore::new(CacheConfig {
            max_size,
            eviction_policy: policy,
            ..CacheConfig::default()
        })
        .unwrap();

        for (i, (file, tier)) in puts.iter().enumerate() {
            let mut options = ExtractionOptions::new();
            options.insert("sequence".to_string(), json!(i));
            store.put(&fx.files[*file], TIERS[*tier], &options, format!("r{}", i), None);
            prop_assert!(
                store.len() <= max_size,
                "size {} exceeds max {}",
                store.len(),
                max_size
            );
        }
    }

    // Statistics accuracy: hits + misses equals the number of get calls,
    // and each get outcome matches a model of the resident keys.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let fx = fixtures();
        let mut store = test_store();

        // Model: which (file, tier) pairs currently hold a value
        let mut model: HashMap<(usize, usize), String> = HashMap::new();
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;
        let mut gets: u64 = 0;

        for (i, op) in ops.iter().enumerate() {
            match *op {
                CacheOp::Put { file, tier } => {
                    let payload = format!("payload_{}", i);
                    if store.put(&fx.files[file], TIERS[tier], &no_options(), payload.clone(), None) {
                        model.insert((file, tier), payload);
                    }
                }
                CacheOp::Get { file, tier } => {
                    gets += 1;
                    let result = store.get(&fx.files[file], TIERS[tier], &no_options());
                    match model.get(&(file, tier)) {
                        Some(expected) => {
                            expected_hits += 1;
                            prop_assert_eq!(result.as_ref(), Some(expected));
                        }
                        None => {
                            expected_misses += 1;
                            prop_assert!(result.is_none());
                        }
                    }
                }
                CacheOp::Invalidate { file, tier } => {
                    let existed = store.invalidate(&fx.files[file], TIERS[tier], &no_options());
                    prop_assert_eq!(existed, model.remove(&(file, tier)).is_some());
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "misses mismatch");
        prop_assert_eq!(stats.hits + stats.misses, gets, "hits + misses must equal get calls");
        prop_assert_eq!(stats.size, model.len(), "size mismatch");

        // Hit rate follows the formula, 0 when no gets were made
        let expected_rate = if gets == 0 {
            0.0
        } else {
            expected_hits as f64 / gets as f64
        };
        prop_assert!((stats.hit_rate - expected_rate).abs() < 1e-9);
    }
}
