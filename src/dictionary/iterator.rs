//! Lazy prefix enumeration over a [`PrefixIndex`].
//!
//! The iterator keeps only a stack of node ids. Keys are rebuilt from parent
//! links when a terminal node is yielded, not while descending, so interior
//! nodes cost nothing beyond a stack push.

use super::alphabet::Alphabet;
use super::trie::{NodeId, PrefixIndex};
use crate::contact::ContactRecord;
use std::iter::FusedIterator;

/// Depth-first iterator yielding `(key, record)` pairs.
///
/// Created by [`PrefixIndex::lookup_prefix`] and [`PrefixIndex::iter`]. It
/// borrows the index, so the index cannot change while a traversal is in
/// flight; start a new traversal to observe later insertions.
pub struct PrefixIter<'a, A: Alphabet> {
    index: &'a PrefixIndex<A>,
    stack: Vec<NodeId>,
}

impl<'a, A: Alphabet> PrefixIter<'a, A> {
    pub(crate) fn new(index: &'a PrefixIndex<A>, start: NodeId) -> Self {
        let mut stack = Vec::with_capacity(16);
        stack.push(start);
        Self { index, stack }
    }

    pub(crate) fn empty(index: &'a PrefixIndex<A>) -> Self {
        Self {
            index,
            stack: Vec::new(),
        }
    }
}

impl<'a, A: Alphabet> Iterator for PrefixIter<'a, A> {
    type Item = (String, &'a ContactRecord);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            let node = self.index.node(id);

            // Reversed so the lowest slot is popped first.
            self.stack
                .extend(node.children.iter().rev().filter_map(|child| *child));

            if node.is_terminal() {
                if let Some(record) = node.payload.as_ref() {
                    return Some((self.index.key_of(id), record));
                }
            }
        }

        None
    }
}

impl<A: Alphabet> FusedIterator for PrefixIter<'_, A> {}

#[cfg(test)]
mod tests {
    use crate::contact::ContactRecord;
    use crate::dictionary::alphabet::Lowercase;
    use crate::dictionary::trie::PrefixIndex;

    #[test]
    fn test_iterator_is_fused() {
        let mut index: PrefixIndex<Lowercase> = PrefixIndex::new();
        index.insert("kim", ContactRecord::new("1", "kim")).unwrap();

        let mut iter = index.lookup_prefix("k");
        assert!(iter.next().is_some());
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_fresh_traversal_each_call() {
        let mut index: PrefixIndex<Lowercase> = PrefixIndex::new();
        index.insert("kim", ContactRecord::new("1", "kim")).unwrap();
        assert_eq!(index.lookup_prefix("k").count(), 1);

        index.insert("kit", ContactRecord::new("2", "kit")).unwrap();
        assert_eq!(index.lookup_prefix("k").count(), 2);
    }
}
