//! The directory context: a prefix index fronted by a recency cache.
//!
//! [`Directory`] owns both structures and keeps them in step:
//!
//! - **Insert** writes the index first, then refreshes the cache entry for the
//!   key with a clone of the new record. A rejected key touches neither.
//! - **Resolve** asks the cache, then falls back to the index and caches what
//!   it finds.
//!
//! Everything runs synchronously on `&mut self`. Callers that share a
//! directory across threads must lock the whole value; promotion and eviction
//! relink the cache list in several steps.

pub mod container;

pub use container::DirectoryContainer;

use crate::cache::{CacheEntry, CacheStats, RecencyCache};
use crate::config::DirectoryConfig;
use crate::contact::ContactRecord;
use crate::dictionary::{Alphabet, PrefixIndex, PrefixIter};
use crate::error::Result;
use tracing::debug;

/// Snapshot of directory counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectoryStats {
    /// Indexed contacts
    pub contacts: usize,
    /// Allocated trie nodes, including the root
    pub nodes: usize,
    /// Entries currently cached
    pub cached: usize,
    /// Cache capacity
    pub capacity: usize,
    /// Cache counters
    pub cache: CacheStats,
    /// Resolves that missed the cache
    pub cache_misses: u64,
    /// Resolves that found nothing at all
    pub not_found: u64,
}

/// A contact directory keyed over alphabet `A`.
///
/// # Examples
///
/// ```rust
/// use contactdir::prelude::*;
///
/// let mut dir: Directory<Digits> = Directory::new(2);
/// dir.insert_contact("4155550100", ContactRecord::new("4155550100", "alice")).unwrap();
/// dir.insert_contact("4155550199", ContactRecord::new("4155550199", "alan")).unwrap();
///
/// let hits: Vec<_> = dir.search_by_prefix("415555010").map(|(key, _)| key).collect();
/// assert_eq!(hits, vec!["4155550100"]);
///
/// assert_eq!(dir.resolve("4155550199").map(|r| r.name), Some("alan".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct Directory<A: Alphabet> {
    index: PrefixIndex<A>,
    cache: RecencyCache<String, ContactRecord>,
    cache_misses: u64,
    not_found: u64,
}

impl<A: Alphabet> Directory<A> {
    /// Creates an empty directory caching at most `capacity` lookups.
    pub fn new(capacity: usize) -> Self {
        Self::from_parts(PrefixIndex::new(), capacity)
    }

    /// Creates an empty directory from a configuration.
    pub fn with_config(config: &DirectoryConfig) -> Self {
        Self::new(config.capacity)
    }

    /// Creates a directory around an existing index.
    ///
    /// The cache starts cold and fills as keys are resolved.
    pub fn from_parts(index: PrefixIndex<A>, capacity: usize) -> Self {
        Directory {
            index,
            cache: RecencyCache::new(capacity),
            cache_misses: 0,
            not_found: 0,
        }
    }

    /// Adds or replaces the contact stored under `key`.
    pub fn insert_contact(&mut self, key: &str, record: ContactRecord) -> Result<()> {
        self.index.insert(key, record.clone())?;
        self.cache.touch(key.to_string(), record);
        Ok(())
    }

    /// Lazily enumerates contacts whose key starts with `prefix`.
    ///
    /// Read-only: the cache is neither consulted nor updated.
    pub fn search_by_prefix(&self, prefix: &str) -> PrefixIter<'_, A> {
        self.index.lookup_prefix(prefix)
    }

    /// Enumerates contacts under `prefix` and resolves each one, so every
    /// result counts as a lookup in the cache.
    pub fn search(&mut self, prefix: &str) -> Vec<(String, ContactRecord)> {
        let keys: Vec<String> = self
            .index
            .lookup_prefix(prefix)
            .map(|(key, _)| key)
            .collect();

        keys.into_iter()
            .filter_map(|key| {
                let record = self.resolve(&key)?;
                Some((key, record))
            })
            .collect()
    }

    /// Returns the contact stored under exactly `key`.
    ///
    /// A cache hit bumps the entry's count and promotes it. On a miss the
    /// index is consulted and a found record is cached before it is returned.
    pub fn resolve(&mut self, key: &str) -> Option<ContactRecord> {
        if let Some(record) = self.cache.record_hit(key) {
            return Some(record.clone());
        }
        self.cache_misses += 1;

        match self.index.lookup_exact(key) {
            Some(record) => {
                let record = record.clone();
                self.cache.touch(key.to_string(), record.clone());
                Some(record)
            }
            None => {
                self.not_found += 1;
                debug!(key, "contact not found");
                None
            }
        }
    }

    /// The most frequently resolved cached contacts, highest count first.
    pub fn top_by_frequency(&self, limit: usize) -> Vec<(String, ContactRecord, u64)> {
        self.cache
            .rank_by_frequency()
            .into_iter()
            .take(limit)
            .map(|entry| {
                (
                    entry.key().clone(),
                    entry.value().clone(),
                    entry.access_count(),
                )
            })
            .collect()
    }

    /// Every contact in key order.
    pub fn contacts(&self) -> PrefixIter<'_, A> {
        self.index.iter()
    }

    /// Cached entries from most to least recently used.
    pub fn cached(&self) -> impl Iterator<Item = &CacheEntry<String, ContactRecord>> + '_ {
        self.cache.iter()
    }

    /// Evicts the least recently used cache entry.
    pub fn evict_lru(&mut self) -> Option<String> {
        self.cache.evict_tail()
    }

    /// Number of indexed contacts.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether no contact has been indexed.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The underlying index.
    pub fn index(&self) -> &PrefixIndex<A> {
        &self.index
    }

    /// The underlying cache.
    pub fn cache(&self) -> &RecencyCache<String, ContactRecord> {
        &self.cache
    }

    /// Current counters.
    pub fn stats(&self) -> DirectoryStats {
        DirectoryStats {
            contacts: self.index.len(),
            nodes: self.index.node_count(),
            cached: self.cache.len(),
            capacity: self.cache.capacity(),
            cache: self.cache.stats(),
            cache_misses: self.cache_misses,
            not_found: self.not_found,
        }
    }

    /// Releases every node and cache entry.
    ///
    /// The directory stays usable and behaves as if freshly created with the
    /// same capacity.
    pub fn teardown(&mut self) {
        debug!(
            contacts = self.index.len(),
            cached = self.cache.len(),
            "tearing down directory"
        );
        self.index.clear();
        self.cache.clear();
        self.cache_misses = 0;
        self.not_found = 0;
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        self.cache.assert_consistent();
        for entry in self.cache.iter() {
            assert_eq!(self.index.lookup_exact(entry.key()), Some(entry.value()));
        }
    }
}
