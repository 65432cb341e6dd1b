//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check expiry and batch behavior of the in-memory driver.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::cache::{ObjectStoreDriver, StorageDriver, TimeUnit, Ttl};

// == Test Configuration ==
const TEST_NOW: i64 = 1_700_000_000;

// == Strategies ==
/// Generates cache keys
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,64}".prop_map(|s| s)
}

/// Generates cache values
fn valid_value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,256}".prop_map(|s| s)
}

fn time_unit_strategy() -> impl Strategy<Value = TimeUnit> {
    prop_oneof![
        Just(TimeUnit::Seconds),
        Just(TimeUnit::Minutes),
        Just(TimeUnit::Hours),
        Just(TimeUnit::Days),
        Just(TimeUnit::Weeks),
        Just(TimeUnit::Months),
        Just(TimeUnit::Quarters),
    ]
}

fn pinned_store() -> ObjectStoreDriver<String> {
    let mut store = ObjectStoreDriver::new();
    store.set_time(Some(TEST_NOW));
    store
}

/// Generates a sequence of driver operations
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String, ttl: i64 },
    Get { key: String },
    Advance { secs: i64 },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (valid_key_strategy(), valid_value_strategy(), -5i64..30)
            .prop_map(|(key, value, ttl)| CacheOp::Set { key, value, ttl }),
        valid_key_strategy().prop_map(|key| CacheOp::Get { key }),
        (0i64..20).prop_map(|secs| CacheOp::Advance { secs }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // A key that was never set reads as None and leaves nothing behind.
    #[test]
    fn prop_unset_key_is_absent(key in valid_key_strategy()) {
        let mut store = pinned_store();

        prop_assert_eq!(store.get(&key), None);
        prop_assert!(store.is_empty());
    }

    // Storing with a positive TTL and reading back before expiry returns the
    // exact value stored.
    #[test]
    fn prop_live_entry_is_visible(
        key in valid_key_strategy(),
        value in valid_value_strategy(),
        ttl in 1i64..100_000
    ) {
        let mut store = pinned_store();

        store.set(&key, value.clone(), ttl).unwrap();

        prop_assert_eq!(store.get(&key), Some(value));
    }

    // A TTL of zero or less stores an entry that is never visible and is
    // removed by the first read.
    #[test]
    fn prop_non_positive_ttl_is_expired(
        key in valid_key_strategy(),
        value in valid_value_strategy(),
        ttl in -100_000i64..=0
    ) {
        let mut store = pinned_store();

        store.set(&key, value, ttl).unwrap();
        prop_assert!(store.contains_key(&key));

        prop_assert_eq!(store.get(&key), None);
        prop_assert!(!store.contains_key(&key), "Expired entry should be evicted");
    }

    // Visibility flips exactly at `expiry`: valid strictly before, expired at
    // and after.
    #[test]
    fn prop_expiry_boundary(
        key in valid_key_strategy(),
        value in valid_value_strategy(),
        ttl in 1i64..10_000,
        offset in 0i64..20_000
    ) {
        let mut store = pinned_store();
        store.set(&key, value.clone(), ttl).unwrap();

        store.set_time(Some(TEST_NOW + offset));
        let expected = if offset < ttl { Some(value) } else { None };

        prop_assert_eq!(store.get(&key), expected);
    }

    // Batch reads cover exactly the requested keys, each matching a
    // single-key read.
    #[test]
    fn prop_get_multiple_covers_input_keys(
        stored in prop::collection::hash_map(valid_key_strategy(), valid_value_strategy(), 0..20),
        extra in prop::collection::vec(valid_key_strategy(), 0..10)
    ) {
        let mut store = pinned_store();
        store.set_multiple(stored.clone(), 60).unwrap();

        let keys: Vec<&str> = stored
            .keys()
            .map(String::as_str)
            .chain(extra.iter().map(String::as_str))
            .collect();
        let result = store.get_multiple(&keys);

        let expected_keys: HashSet<&str> = keys.iter().copied().collect();
        let actual_keys: HashSet<&str> = result.keys().map(String::as_str).collect();
        prop_assert_eq!(actual_keys, expected_keys);

        for (key, value) in &result {
            prop_assert_eq!(value, &stored.get(key).cloned());
        }
    }

    // Duration descriptors normalize to amount times the unit length.
    #[test]
    fn prop_duration_normalization(amount in 0i64..10_000, unit in time_unit_strategy()) {
        let secs = Ttl::Duration(amount as f64, unit).as_seconds().unwrap();
        prop_assert_eq!(secs, amount * unit.seconds_per_unit());
    }

    // A half unit is exactly half the unit length, rounded down.
    #[test]
    fn prop_half_amount_truncates(amount in 0i64..10_000, unit in time_unit_strategy()) {
        let secs = Ttl::Duration(amount as f64 + 0.5, unit).as_seconds().unwrap();
        let length = unit.seconds_per_unit();
        prop_assert_eq!(secs, amount * length + length / 2);
    }

    // For any operation sequence, the driver agrees with a model that tracks
    // expiry timestamps and applies the strict `now < expiry` rule.
    #[test]
    fn prop_matches_expiry_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut store = pinned_store();
        let mut model: HashMap<String, (String, i64)> = HashMap::new();
        let mut now = TEST_NOW;

        for op in ops {
            match op {
                CacheOp::Set { key, value, ttl } => {
                    store.set(&key, value.clone(), ttl).unwrap();
                    model.insert(key, (value, now + ttl));
                }
                CacheOp::Get { key } => {
                    let expected = match model.get(&key) {
                        Some((value, expiry)) if now < *expiry => Some(value.clone()),
                        _ => None,
                    };
                    if expected.is_none() {
                        model.remove(&key);
                    }
                    prop_assert_eq!(store.get(&key), expected);
                }
                CacheOp::Advance { secs } => {
                    now += secs;
                    store.set_time(Some(now));
                }
            }
            prop_assert_eq!(store.len(), model.len(), "Stored entry count mismatch");
        }
    }
}
