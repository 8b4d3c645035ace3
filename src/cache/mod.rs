//! Bounded cache of recently resolved contacts.
//!
//! The cache sits in front of the [`PrefixIndex`](crate::dictionary::PrefixIndex)
//! and never aliases it: values are owned clones, so evicting an entry or
//! replacing an index payload cannot invalidate the other structure.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  RecencyCache<K, V>                      │
//! │  slots: FxHashMap<K, Slot> ──┐                           │
//! │                              ▼                           │
//! │  order: LinkedSlab   head ⇄ entry ⇄ entry ⇄ tail         │
//! │         (MRU)                                 (LRU)      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Eviction always takes the tail. Frequency ranking is a sorted view over
//! the same entries and does not disturb the recency order.

mod list;
pub mod recency;

pub use recency::{CacheEntry, CacheStats, RecencyCache};
