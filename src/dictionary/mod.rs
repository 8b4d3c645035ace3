//! Prefix index over contact keys.
//!
//! A trie whose branching factor is fixed by an [`Alphabet`]: ten slots per
//! node for phone numbers, twenty-six for lowercase names. The index is the
//! authoritative store; nothing here knows about the cache.

pub mod alphabet;
pub mod iterator;
pub mod trie;

pub use alphabet::{Alphabet, Digits, Lowercase};
pub use iterator::PrefixIter;
pub use trie::PrefixIndex;
