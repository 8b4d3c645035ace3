//! Bounded recency cache with per-entry hit counters.
//!
//! Entries are kept in an index-linked list ordered most-recently-used
//! first, with a hash index from key to slot for O(1) lookup. Two orderings
//! are available:
//!
//! - **Recency** (the list itself): drives eviction. The tail goes first.
//! - **Frequency** ([`RecencyCache::rank_by_frequency`]): a sorted view built
//!   on demand. Producing it never reorders the list.
//!
//! # Examples
//!
//! ```rust
//! use contactdir::cache::RecencyCache;
//!
//! let mut cache = RecencyCache::new(2);
//! cache.touch("a", 1);
//! cache.touch("b", 2);
//! cache.touch("c", 3);
//!
//! // "a" was least recently used.
//! assert!(!cache.contains(&"a"));
//! assert_eq!(cache.head(), Some(&"c"));
//! assert_eq!(cache.tail(), Some(&"b"));
//! ```

use super::list::{LinkedSlab, Slot};
use rustc_hash::FxHashMap;
use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use tracing::{debug, trace};

/// A cached key/value pair and its hit count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry<K, V> {
    key: K,
    value: V,
    access_count: u64,
}

impl<K, V> CacheEntry<K, V> {
    fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            access_count: 0,
        }
    }

    /// The entry key.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The cached value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Number of hits since the entry was created.
    pub fn access_count(&self) -> u64 {
        self.access_count
    }
}

/// Cumulative cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Successful `record_hit` calls
    pub hits: u64,
    /// Entries created by `touch`
    pub insertions: u64,
    /// Entries dropped from the tail
    pub evictions: u64,
}

/// Fixed-capacity cache ordered by recency.
///
/// A capacity of zero disables the cache: `touch` stores nothing and every
/// lookup misses.
#[derive(Clone)]
pub struct RecencyCache<K, V> {
    capacity: usize,
    order: LinkedSlab<CacheEntry<K, V>>,
    slots: FxHashMap<K, Slot>,
    stats: CacheStats,
}

impl<K, V> RecencyCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    /// Creates an empty cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        RecencyCache {
            capacity,
            order: LinkedSlab::with_capacity(capacity),
            slots: FxHashMap::default(),
            stats: CacheStats::default(),
        }
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.order.len() == 0
    }

    /// Cumulative counters.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Writes `value` under `key` and makes it the most recently used entry.
    ///
    /// An existing entry is moved to the head and its value replaced; its
    /// access count is kept. A new entry starts at the head with a count of
    /// zero, and if that overflows the capacity the tail is evicted,
    /// regardless of how often it was hit.
    pub fn touch(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }

        if let Some(&slot) = self.slots.get(&key) {
            if let Some(entry) = self.order.get_mut(slot) {
                entry.value = value;
            }
            self.order.move_to_front(slot);
            trace!(?key, "promoted cache entry on write");
            return;
        }

        let slot = self.order.push_front(CacheEntry::new(key.clone(), value));
        self.slots.insert(key, slot);
        self.stats.insertions += 1;

        if self.order.len() > self.capacity {
            self.evict_tail();
        }
    }

    /// Looks up `key`, counting the hit and promoting the entry to the head.
    ///
    /// A miss returns `None` and leaves the cache untouched; the caller is
    /// expected to consult the index and `touch` the result.
    pub fn record_hit<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = *self.slots.get(key)?;
        self.order.move_to_front(slot);
        self.stats.hits += 1;

        let entry = self.order.get_mut(slot)?;
        entry.access_count = entry.access_count.saturating_add(1);
        trace!(key = ?entry.key, count = entry.access_count, "cache hit");
        Some(&entry.value)
    }

    /// Returns the cached value without counting or promoting.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = *self.slots.get(key)?;
        self.order.get(slot).map(|entry| &entry.value)
    }

    /// Hit count for `key`, if cached.
    pub fn access_count<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = *self.slots.get(key)?;
        self.order.get(slot).map(|entry| entry.access_count)
    }

    /// Whether `key` is cached.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slots.contains_key(key)
    }

    /// Drops the entry for `key`, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.slots.remove(key)?;
        self.order.remove(slot).map(|entry| entry.value)
    }

    /// Evicts the least recently used entry and returns its key.
    pub fn evict_tail(&mut self) -> Option<K> {
        let entry = self.order.pop_back()?;
        self.slots.remove(&entry.key);
        self.stats.evictions += 1;
        debug!(
            key = ?entry.key,
            access_count = entry.access_count,
            "evicted least recently used entry"
        );
        Some(entry.key)
    }

    /// Key of the most recently used entry.
    pub fn head(&self) -> Option<&K> {
        self.order
            .head()
            .and_then(|slot| self.order.get(slot))
            .map(|entry| &entry.key)
    }

    /// Key of the least recently used entry.
    pub fn tail(&self) -> Option<&K> {
        self.order
            .tail()
            .and_then(|slot| self.order.get(slot))
            .map(|entry| &entry.key)
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &CacheEntry<K, V>> + '_ {
        self.order.iter()
    }

    /// Entries sorted by descending access count.
    ///
    /// Ties keep their recency order, most recent first. The cache itself is
    /// not reordered.
    pub fn rank_by_frequency(&self) -> Vec<&CacheEntry<K, V>> {
        let mut ranked: Vec<_> = self.order.iter().collect();
        ranked.sort_by(|a, b| b.access_count.cmp(&a.access_count));
        ranked
    }

    /// Drops every entry and resets the counters.
    pub fn clear(&mut self) {
        debug!(entries = self.order.len(), "clearing cache");
        self.order.clear();
        self.slots = FxHashMap::default();
        self.stats = CacheStats::default();
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        self.order.assert_consistent();
        assert_eq!(self.slots.len(), self.order.len());
        assert!(self.order.len() <= self.capacity);
        for (key, &slot) in &self.slots {
            assert_eq!(self.order.get(slot).map(|e| &e.key), Some(key));
        }
    }
}

impl<K, V> fmt::Debug for RecencyCache<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecencyCache")
            .field("capacity", &self.capacity)
            .field("entries", &self.order.iter().collect::<Vec<_>>())
            .field("stats", &self.stats)
            .finish()
    }
}
