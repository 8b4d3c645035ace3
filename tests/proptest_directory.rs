//! Property-based tests for the prefix index, the recency cache and the
//! directory that combines them.

use contactdir::prelude::*;
use proptest::prelude::*;
use std::collections::BTreeMap;

// ============================================================================
// Test Data Strategies
// ============================================================================

/// Short lowercase names so that prefixes are shared often
fn name_strategy() -> impl Strategy<Value = String> {
    "[a-d]{1,6}"
}

fn names_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(name_strategy(), 0..=40)
}

fn phone_strategy() -> impl Strategy<Value = String> {
    "[0-3]{10}"
}

#[derive(Debug, Clone)]
enum CacheOp {
    Touch(u8, u32),
    Hit(u8),
    Evict,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        3 => (0u8..8, any::<u32>()).prop_map(|(k, v)| CacheOp::Touch(k, v)),
        3 => (0u8..8).prop_map(CacheOp::Hit),
        1 => Just(CacheOp::Evict),
    ]
}

// ============================================================================
// Reference Model
// ============================================================================

/// Most recent first: (key, value, access_count)
#[derive(Default)]
struct ModelCache {
    capacity: usize,
    entries: Vec<(u8, u32, u64)>,
}

impl ModelCache {
    fn apply(&mut self, op: &CacheOp) {
        if self.capacity == 0 {
            return;
        }
        match *op {
            CacheOp::Touch(key, value) => {
                let count = match self.entries.iter().position(|e| e.0 == key) {
                    Some(pos) => self.entries.remove(pos).2,
                    None => 0,
                };
                self.entries.insert(0, (key, value, count));
                self.entries.truncate(self.capacity);
            }
            CacheOp::Hit(key) => {
                if let Some(pos) = self.entries.iter().position(|e| e.0 == key) {
                    let (k, v, c) = self.entries.remove(pos);
                    self.entries.insert(0, (k, v, c + 1));
                }
            }
            CacheOp::Evict => {
                self.entries.pop();
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: the cache agrees with a naive list model after any sequence
    /// of operations, and never exceeds its capacity.
    #[test]
    fn prop_cache_matches_model(
        capacity in 0usize..=5,
        ops in prop::collection::vec(cache_op_strategy(), 0..60)
    ) {
        let mut cache = RecencyCache::new(capacity);
        let mut model = ModelCache { capacity, ..ModelCache::default() };

        for op in &ops {
            match *op {
                CacheOp::Touch(key, value) => cache.touch(key, value),
                CacheOp::Hit(key) => {
                    let expected = model.entries.iter().find(|e| e.0 == key).map(|e| e.1);
                    prop_assert_eq!(cache.record_hit(&key).copied(), expected);
                }
                CacheOp::Evict => {
                    let expected = model.entries.last().map(|e| e.0);
                    prop_assert_eq!(cache.evict_tail(), expected);
                }
            }
            model.apply(op);

            prop_assert!(cache.len() <= capacity);
            let actual: Vec<(u8, u32, u64)> = cache
                .iter()
                .map(|e| (*e.key(), *e.value(), e.access_count()))
                .collect();
            prop_assert_eq!(&actual, &model.entries);
        }
    }

    /// Property: ranking is a sorted view of the recency order and leaves it intact.
    #[test]
    fn prop_rank_is_stable_view(
        ops in prop::collection::vec(cache_op_strategy(), 0..60)
    ) {
        let mut cache = RecencyCache::new(5);
        for op in &ops {
            match *op {
                CacheOp::Touch(key, value) => cache.touch(key, value),
                CacheOp::Hit(key) => { cache.record_hit(&key); }
                CacheOp::Evict => { cache.evict_tail(); }
            }
        }

        let before: Vec<u8> = cache.iter().map(|e| *e.key()).collect();
        let ranked: Vec<(u8, u64)> = cache
            .rank_by_frequency()
            .into_iter()
            .map(|e| (*e.key(), e.access_count()))
            .collect();
        let after: Vec<u8> = cache.iter().map(|e| *e.key()).collect();
        prop_assert_eq!(&before, &after);

        let mut expected: Vec<(u8, u64)> = cache
            .iter()
            .map(|e| (*e.key(), e.access_count()))
            .collect();
        expected.sort_by(|a, b| b.1.cmp(&a.1));
        prop_assert_eq!(ranked, expected);
    }

    /// Property: exact lookup returns the last record inserted for each key.
    #[test]
    fn prop_index_round_trip(names in names_strategy()) {
        let mut index: PrefixIndex<Lowercase> = PrefixIndex::new();
        let mut expected = BTreeMap::new();

        for (i, name) in names.iter().enumerate() {
            let record = ContactRecord::new(i.to_string(), name.clone());
            index.insert(name, record.clone()).unwrap();
            expected.insert(name.clone(), record);
        }

        prop_assert_eq!(index.len(), expected.len());
        for (name, record) in &expected {
            prop_assert_eq!(index.lookup_exact(name), Some(record));
        }
    }

    /// Property: prefix enumeration yields exactly the keys sharing the prefix,
    /// in ascending order.
    #[test]
    fn prop_prefix_enumeration_complete(
        names in names_strategy(),
        prefix in "[a-d]{0,3}"
    ) {
        let mut index: PrefixIndex<Lowercase> = PrefixIndex::new();
        for name in &names {
            index.insert(name, ContactRecord::new("0", name.clone())).unwrap();
        }

        let found: Vec<String> = index.lookup_prefix(&prefix).map(|(key, _)| key).collect();

        let mut expected: Vec<String> = names
            .iter()
            .filter(|name| name.starts_with(&prefix))
            .cloned()
            .collect();
        expected.sort();
        expected.dedup();

        prop_assert_eq!(found, expected);
    }

    /// Property: every cached entry mirrors the index, and the cache holds at
    /// most its capacity, whatever mix of inserts and resolves runs.
    #[test]
    fn prop_directory_cache_mirrors_index(
        phones in prop::collection::vec(phone_strategy(), 1..20),
        lookups in prop::collection::vec(0usize..40, 0..40),
        capacity in 0usize..=4
    ) {
        let mut dir: Directory<Digits> = Directory::new(capacity);
        for (i, phone) in phones.iter().enumerate() {
            dir.insert_contact(phone, ContactRecord::new(phone.clone(), format!("n{}", i)))
                .unwrap();
        }

        for pick in lookups {
            let phone = &phones[pick % phones.len()];
            prop_assert!(dir.resolve(phone).is_some());
            prop_assert!(dir.cache().len() <= capacity);
        }

        for entry in dir.cached() {
            prop_assert_eq!(dir.index().lookup_exact(entry.key()), Some(entry.value()));
        }
    }
}
