//! Arena-backed trie keyed over a fixed alphabet.
//!
//! Nodes live in a single `Vec` and refer to each other by index. Each node
//! owns a fixed slice of `A::SIZE` child slots, so descending one symbol is a
//! direct index rather than a search. Nodes are never removed individually;
//! the whole arena is released by [`PrefixIndex::clear`].

use super::alphabet::Alphabet;
use super::iterator::PrefixIter;
use crate::contact::ContactRecord;
use crate::error::{DirectoryError, InvalidKeyReason, Result};
use smallvec::SmallVec;
use std::marker::PhantomData;
use tracing::debug;

/// Index of a node in the arena.
pub(crate) type NodeId = usize;

pub(crate) const ROOT: NodeId = 0;

/// Slot path of an encoded key. Phone numbers fit inline.
type SlotPath = SmallVec<[u8; 16]>;

#[derive(Debug, Clone)]
pub(crate) struct TrieNode {
    pub(crate) children: Box<[Option<NodeId>]>,
    pub(crate) parent: Option<NodeId>,
    /// Slot this node occupies in its parent. Meaningless for the root.
    pub(crate) slot: u8,
    /// Set iff the node terminates an inserted key.
    pub(crate) payload: Option<ContactRecord>,
}

impl TrieNode {
    fn new(width: usize, parent: Option<NodeId>, slot: u8) -> Self {
        TrieNode {
            children: vec![None; width].into_boxed_slice(),
            parent,
            slot,
            payload: None,
        }
    }

    #[inline]
    pub(crate) fn is_terminal(&self) -> bool {
        self.payload.is_some()
    }
}

/// Authoritative mapping from sequence keys to contact records.
///
/// # Performance
///
/// - Insertion: O(m) where m is the key length
/// - Exact lookup: O(m), no allocation
/// - Prefix enumeration: O(m + n) where n is the size of the matching subtree
///
/// # Examples
///
/// ```rust
/// use contactdir::prelude::*;
///
/// let mut index: PrefixIndex<Digits> = PrefixIndex::new();
/// index.insert("4155550100", ContactRecord::new("4155550100", "alice")).unwrap();
///
/// assert_eq!(index.lookup_exact("4155550100").map(|r| r.name.as_str()), Some("alice"));
/// assert_eq!(index.lookup_prefix("415").count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct PrefixIndex<A: Alphabet> {
    nodes: Vec<TrieNode>,
    key_length: Option<usize>,
    term_count: usize,
    _alphabet: PhantomData<A>,
}

impl<A: Alphabet> PrefixIndex<A> {
    /// Creates an empty index using the alphabet's default key length.
    pub fn new() -> Self {
        Self::with_key_length(A::DEFAULT_KEY_LENGTH)
    }

    /// Creates an empty index that requires keys of exactly `key_length`
    /// symbols, or of any non-zero length when `None`.
    pub fn with_key_length(key_length: Option<usize>) -> Self {
        PrefixIndex {
            nodes: vec![TrieNode::new(A::SIZE, None, 0)],
            key_length,
            term_count: 0,
            _alphabet: PhantomData,
        }
    }

    /// Required key length, if any.
    pub fn key_length(&self) -> Option<usize> {
        self.key_length
    }

    /// Checks a key against the alphabet and length constraint without
    /// touching the index.
    pub fn validate(&self, key: &str) -> Result<()> {
        self.encode(key).map(|_| ())
    }

    fn encode(&self, key: &str) -> Result<SlotPath> {
        if key.is_empty() {
            return Err(DirectoryError::invalid_key(key, InvalidKeyReason::Empty));
        }

        let mut path = SlotPath::new();
        for (position, symbol) in key.chars().enumerate() {
            match A::index_of(symbol) {
                Some(slot) => path.push(slot as u8),
                None => {
                    return Err(DirectoryError::invalid_key(
                        key,
                        InvalidKeyReason::InvalidSymbol { symbol, position },
                    ))
                }
            }
        }

        if let Some(expected) = self.key_length {
            if path.len() != expected {
                return Err(DirectoryError::invalid_key(
                    key,
                    InvalidKeyReason::WrongLength {
                        expected,
                        actual: path.len(),
                    },
                ));
            }
        }

        Ok(path)
    }

    /// Inserts a record under `key`, replacing any record already there.
    ///
    /// Returns the replaced record. The key is validated in full before any
    /// node is allocated, so a rejected key leaves the index untouched.
    pub fn insert(&mut self, key: &str, record: ContactRecord) -> Result<Option<ContactRecord>> {
        let path = self.encode(key)?;

        let mut node = ROOT;
        for &slot in &path {
            node = match self.nodes[node].children[slot as usize] {
                Some(child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::new(A::SIZE, Some(node), slot));
                    self.nodes[node].children[slot as usize] = Some(child);
                    child
                }
            };
        }

        let previous = self.nodes[node].payload.replace(record);
        if previous.is_none() {
            self.term_count += 1;
        }
        debug!(
            key,
            replaced = previous.is_some(),
            nodes = self.nodes.len(),
            "indexed contact"
        );
        Ok(previous)
    }

    /// Walks `key` from the root. Symbols outside the alphabet simply fail
    /// to match.
    fn walk(&self, key: &str) -> Option<NodeId> {
        let mut node = ROOT;
        for symbol in key.chars() {
            let slot = A::index_of(symbol)?;
            node = self.nodes[node].children[slot]?;
        }
        Some(node)
    }

    /// Returns the record stored under exactly `key`.
    pub fn lookup_exact(&self, key: &str) -> Option<&ContactRecord> {
        self.walk(key)
            .and_then(|node| self.nodes[node].payload.as_ref())
    }

    /// Checks whether `key` has been inserted.
    pub fn contains(&self, key: &str) -> bool {
        self.lookup_exact(key).is_some()
    }

    /// Lazily enumerates every `(key, record)` whose key starts with `prefix`.
    ///
    /// Results come out depth-first in ascending symbol order, a key before
    /// its extensions. An unmatched prefix yields nothing; an empty prefix
    /// yields everything.
    pub fn lookup_prefix(&self, prefix: &str) -> PrefixIter<'_, A> {
        match self.walk(prefix) {
            Some(node) => PrefixIter::new(self, node),
            None => PrefixIter::empty(self),
        }
    }

    /// Enumerates every entry; equivalent to `lookup_prefix("")`.
    pub fn iter(&self) -> PrefixIter<'_, A> {
        PrefixIter::new(self, ROOT)
    }

    /// Number of inserted keys.
    pub fn len(&self) -> usize {
        self.term_count
    }

    /// Whether no key has been inserted.
    pub fn is_empty(&self) -> bool {
        self.term_count == 0
    }

    /// Number of allocated nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Drops every node and record, releasing the arena.
    pub fn clear(&mut self) {
        debug!(keys = self.term_count, nodes = self.nodes.len(), "clearing index");
        self.nodes = vec![TrieNode::new(A::SIZE, None, 0)];
        self.term_count = 0;
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &TrieNode {
        &self.nodes[id]
    }

    /// Rebuilds the key spelled by the path from the root to `id`.
    pub(crate) fn key_of(&self, id: NodeId) -> String {
        let mut symbols = SmallVec::<[char; 16]>::new();
        let mut current = id;
        while let Some(parent) = self.nodes[current].parent {
            symbols.push(A::symbol_at(self.nodes[current].slot as usize));
            current = parent;
        }
        symbols.iter().rev().collect()
    }
}

impl<A: Alphabet> Default for PrefixIndex<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, A: Alphabet> IntoIterator for &'a PrefixIndex<A> {
    type Item = (String, &'a ContactRecord);
    type IntoIter = PrefixIter<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::alphabet::{Digits, Lowercase};

    fn phone_index(entries: &[(&str, &str)]) -> PrefixIndex<Digits> {
        let mut index = PrefixIndex::new();
        for (phone, name) in entries {
            index
                .insert(phone, ContactRecord::new(*phone, *name))
                .unwrap();
        }
        index
    }

    #[test]
    fn test_insert_then_lookup_exact() {
        let index = phone_index(&[("4155550100", "alice")]);
        let record = index.lookup_exact("4155550100").unwrap();
        assert_eq!(record.name, "alice");
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_insert_replaces_payload() {
        let mut index = phone_index(&[("4155550100", "alice")]);
        let previous = index
            .insert("4155550100", ContactRecord::new("4155550100", "alicia"))
            .unwrap();

        assert_eq!(previous.map(|r| r.name), Some("alice".to_string()));
        assert_eq!(index.lookup_exact("4155550100").unwrap().name, "alicia");
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_prefix_is_not_a_match() {
        let index = phone_index(&[("4155550100", "alice")]);
        assert_eq!(index.lookup_exact("415555"), None);
        assert_eq!(index.lookup_exact(""), None);
    }

    #[test]
    fn test_invalid_keys_do_not_mutate() {
        let mut index = phone_index(&[("4155550100", "alice")]);
        let nodes = index.node_count();

        let short = index.insert("41555", ContactRecord::new("41555", "bob"));
        assert!(matches!(
            short,
            Err(DirectoryError::InvalidKey {
                reason: InvalidKeyReason::WrongLength { expected: 10, actual: 5 },
                ..
            })
        ));

        let symbol = index.insert("41555x0100", ContactRecord::new("41555x0100", "bob"));
        assert!(matches!(
            symbol,
            Err(DirectoryError::InvalidKey {
                reason: InvalidKeyReason::InvalidSymbol { symbol: 'x', position: 5 },
                ..
            })
        ));

        let empty = index.insert("", ContactRecord::new("", "bob"));
        assert!(matches!(
            empty,
            Err(DirectoryError::InvalidKey {
                reason: InvalidKeyReason::Empty,
                ..
            })
        ));

        assert_eq!(index.node_count(), nodes);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_prefix_search_narrow() {
        let index = phone_index(&[("4155550100", "alice"), ("4155550199", "alan")]);
        let results: Vec<_> = index
            .lookup_prefix("415555010")
            .map(|(key, record)| (key, record.name.clone()))
            .collect();

        assert_eq!(results, vec![("4155550100".to_string(), "alice".to_string())]);
    }

    #[test]
    fn test_prefix_search_order_is_ascending() {
        let index = phone_index(&[
            ("9000000000", "zed"),
            ("1000000002", "bea"),
            ("1000000001", "ann"),
            ("5000000000", "max"),
        ]);

        let keys: Vec<String> = index.iter().map(|(key, _)| key).collect();
        assert_eq!(
            keys,
            vec!["1000000001", "1000000002", "5000000000", "9000000000"]
        );
    }

    #[test]
    fn test_unmatched_prefix_is_empty() {
        let index = phone_index(&[("4155550100", "alice")]);
        assert_eq!(index.lookup_prefix("416").count(), 0);
        assert_eq!(index.lookup_prefix("41a").count(), 0);
        assert_eq!(PrefixIndex::<Digits>::new().lookup_prefix("").count(), 0);
    }

    #[test]
    fn test_names_yield_key_before_extensions() {
        let mut index: PrefixIndex<Lowercase> = PrefixIndex::new();
        for name in ["anne", "ann", "andrew", "bob"] {
            index
                .insert(name, ContactRecord::new("0000000000", name))
                .unwrap();
        }

        let keys: Vec<String> = index.lookup_prefix("an").map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["andrew", "ann", "anne"]);
    }

    #[test]
    fn test_clear_releases_nodes() {
        let mut index = phone_index(&[("4155550100", "alice"), ("4155550199", "alan")]);
        assert!(index.node_count() > 1);

        index.clear();

        assert_eq!(index.node_count(), 1);
        assert!(index.is_empty());
        assert_eq!(index.lookup_exact("4155550100"), None);
    }
}
