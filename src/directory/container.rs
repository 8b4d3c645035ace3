//! Runtime selection between phone-keyed and name-keyed directories.

use super::{Directory, DirectoryStats};
use crate::config::DirectoryConfig;
use crate::contact::{ContactRecord, KeyScheme};
use crate::dictionary::{Digits, Lowercase};
use crate::error::Result;

/// A directory whose key scheme is chosen at runtime.
#[derive(Debug, Clone)]
pub enum DirectoryContainer {
    /// Keyed on phone numbers
    Phone(Directory<Digits>),
    /// Keyed on names
    Name(Directory<Lowercase>),
}

macro_rules! dispatch {
    ($self:expr, $dir:ident => $body:expr) => {
        match $self {
            DirectoryContainer::Phone($dir) => $body,
            DirectoryContainer::Name($dir) => $body,
        }
    };
}

impl DirectoryContainer {
    /// Creates an empty directory for the configured scheme and capacity.
    pub fn new(config: &DirectoryConfig) -> Self {
        match config.key_scheme {
            KeyScheme::Phone => DirectoryContainer::Phone(Directory::with_config(config)),
            KeyScheme::Name => DirectoryContainer::Name(Directory::with_config(config)),
        }
    }

    /// The active key scheme.
    pub fn scheme(&self) -> KeyScheme {
        match self {
            DirectoryContainer::Phone(_) => KeyScheme::Phone,
            DirectoryContainer::Name(_) => KeyScheme::Name,
        }
    }

    /// Inserts a record under the field selected by the key scheme.
    pub fn insert(&mut self, record: ContactRecord) -> Result<()> {
        let key = self.scheme().key_of(&record).to_string();
        dispatch!(self, dir => dir.insert_contact(&key, record))
    }

    /// Untracked prefix enumeration, collected.
    pub fn search_by_prefix(&self, prefix: &str) -> Vec<(String, ContactRecord)> {
        dispatch!(self, dir => dir
            .search_by_prefix(prefix)
            .map(|(key, record)| (key, record.clone()))
            .collect())
    }

    /// Prefix search that resolves each match through the cache.
    pub fn search(&mut self, prefix: &str) -> Vec<(String, ContactRecord)> {
        dispatch!(self, dir => dir.search(prefix))
    }

    /// Resolves a single key.
    pub fn resolve(&mut self, key: &str) -> Option<ContactRecord> {
        dispatch!(self, dir => dir.resolve(key))
    }

    /// Frequency report.
    pub fn top_by_frequency(&self, limit: usize) -> Vec<(String, ContactRecord, u64)> {
        dispatch!(self, dir => dir.top_by_frequency(limit))
    }

    /// All contacts in key order.
    pub fn contacts(&self) -> Vec<(String, ContactRecord)> {
        dispatch!(self, dir => dir
            .contacts()
            .map(|(key, record)| (key, record.clone()))
            .collect())
    }

    /// Cache contents from most to least recently used, with hit counts.
    pub fn cached(&self) -> Vec<(String, ContactRecord, u64)> {
        dispatch!(self, dir => dir
            .cached()
            .map(|entry| (entry.key().clone(), entry.value().clone(), entry.access_count()))
            .collect())
    }

    /// Evicts the least recently used cache entry.
    pub fn evict_lru(&mut self) -> Option<String> {
        dispatch!(self, dir => dir.evict_lru())
    }

    /// Number of indexed contacts.
    pub fn len(&self) -> usize {
        dispatch!(self, dir => dir.len())
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current counters.
    pub fn stats(&self) -> DirectoryStats {
        dispatch!(self, dir => dir.stats())
    }

    /// Releases all nodes and entries.
    pub fn teardown(&mut self) {
        dispatch!(self, dir => dir.teardown())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_selects_key_field() {
        let config = DirectoryConfig {
            key_scheme: KeyScheme::Name,
            ..DirectoryConfig::default()
        };
        let mut dir = DirectoryContainer::new(&config);
        dir.insert(ContactRecord::new("4155550100", "alice")).unwrap();

        assert_eq!(dir.scheme(), KeyScheme::Name);
        assert!(dir.resolve("alice").is_some());
        assert!(dir.resolve("4155550100").is_none());
    }

    #[test]
    fn test_phone_scheme_rejects_short_numbers() {
        let mut dir = DirectoryContainer::new(&DirectoryConfig::default());
        assert!(dir.insert(ContactRecord::new("12345", "bob")).is_err());
        assert!(dir.is_empty());
    }
}
