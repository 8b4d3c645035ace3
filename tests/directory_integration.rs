//! Integration tests for the directory: index and cache working together.

use contactdir::prelude::*;

fn contact(phone: &str, name: &str) -> ContactRecord {
    ContactRecord::new(phone, name)
}

fn phone_directory(capacity: usize) -> Directory<Digits> {
    let mut dir = Directory::new(capacity);
    for (phone, name) in [
        ("4155550100", "alice"),
        ("4155550199", "alan"),
        ("4155551234", "bob"),
        ("2125550000", "carol"),
    ] {
        dir.insert_contact(phone, contact(phone, name)).unwrap();
    }
    dir
}

#[test]
fn test_prefix_search_narrows_to_one() {
    let dir = phone_directory(5);

    let hits: Vec<(String, String)> = dir
        .search_by_prefix("415555010")
        .map(|(key, record)| (key, record.name.clone()))
        .collect();
    assert_eq!(
        hits,
        vec![("4155550100".to_string(), "alice".to_string())]
    );
}

#[test]
fn test_prefix_search_is_ordered_and_complete() {
    let dir = phone_directory(5);

    let keys: Vec<String> = dir.search_by_prefix("415").map(|(key, _)| key).collect();
    assert_eq!(keys, vec!["4155550100", "4155550199", "4155551234"]);

    let all: Vec<String> = dir.contacts().map(|(key, _)| key).collect();
    assert_eq!(
        all,
        vec!["2125550000", "4155550100", "4155550199", "4155551234"]
    );

    assert_eq!(dir.search_by_prefix("9").count(), 0);
    assert_eq!(dir.search_by_prefix("41x").count(), 0);
}

#[test]
fn test_prefix_search_does_not_touch_cache() {
    let mut dir: Directory<Digits> = Directory::new(5);
    dir.insert_contact("4155550100", contact("4155550100", "alice"))
        .unwrap();
    let before = dir.stats();

    let _ = dir.search_by_prefix("4").count();
    assert_eq!(dir.stats(), before);
}

#[test]
fn test_cache_holds_most_recent_lookups() {
    let mut dir = phone_directory(2);

    dir.resolve("4155550100");
    dir.resolve("4155550199");
    dir.resolve("2125550000");

    let cached: Vec<&String> = dir.cached().map(|entry| entry.key()).collect();
    assert_eq!(cached, vec!["2125550000", "4155550199"]);
    assert!(dir.cache().len() <= dir.cache().capacity());

    // Evicted from the cache, still in the index.
    assert_eq!(
        dir.resolve("4155550100").map(|r| r.name),
        Some("alice".to_string())
    );
}

#[test]
fn test_top_by_frequency_reports_counts() {
    let mut dir = phone_directory(5);

    for _ in 0..3 {
        dir.resolve("4155551234");
    }
    dir.resolve("4155550100");

    let top = dir.top_by_frequency(2);
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].0, "4155551234");
    assert_eq!(top[0].1.name, "bob");
    assert!(top[0].2 >= top[1].2);

    // The report does not reorder the cache.
    assert_eq!(dir.cache().head().map(String::as_str), Some("4155550100"));
}

#[test]
fn test_invalid_keys_are_rejected_without_side_effects() {
    let mut dir = phone_directory(5);
    let before = dir.stats();

    for key in ["", "41555501", "415555010x", "41555501000"] {
        let err = dir
            .insert_contact(key, contact(key, "mallory"))
            .unwrap_err();
        assert!(matches!(err, DirectoryError::InvalidKey { .. }));
    }

    assert_eq!(dir.stats(), before);
}

#[test]
fn test_name_directory() {
    let mut dir: Directory<Lowercase> = Directory::new(3);
    for (name, phone) in [("anne", "1"), ("ann", "2"), ("andrew", "3"), ("bea", "4")] {
        dir.insert_contact(name, contact(phone, name)).unwrap();
    }

    let names: Vec<String> = dir.search_by_prefix("an").map(|(key, _)| key).collect();
    assert_eq!(names, vec!["andrew", "ann", "anne"]);

    assert!(dir.insert_contact("Anne", contact("5", "Anne")).is_err());
}

#[test]
fn test_teardown_leaves_usable_directory() {
    let mut dir = phone_directory(3);
    dir.resolve("4155550100");

    dir.teardown();
    assert!(dir.is_empty());
    assert_eq!(dir.stats().nodes, 1);
    assert_eq!(dir.cached().count(), 0);

    dir.insert_contact("4155550100", contact("4155550100", "alice"))
        .unwrap();
    assert_eq!(dir.len(), 1);
}

#[test]
fn test_independent_directories() {
    let mut first = phone_directory(2);
    let second = phone_directory(2);

    first.resolve("2125550000");
    assert_eq!(first.cache().stats().hits, 1);
    assert_eq!(second.cache().stats().hits, 0);
}

#[test]
fn test_huge_capacity_from_config() {
    for capacity in [usize::MAX, 1 << 40] {
        let config = DirectoryConfig {
            capacity,
            ..DirectoryConfig::default()
        };
        let mut dir: Directory<Digits> = Directory::with_config(&config);
        dir.insert_contact("4155550100", contact("4155550100", "alice"))
            .unwrap();

        assert_eq!(
            dir.resolve("4155550100").map(|r| r.name),
            Some("alice".to_string())
        );
        assert_eq!(dir.stats().capacity, capacity);
        assert_eq!(dir.top_by_frequency(5)[0].2, 1);
    }
}
