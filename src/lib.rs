//! # contactdir
//!
//! A contact directory with prefix search over phone numbers or names,
//! fronted by a bounded cache of recent lookups.
//!
//! Two structures do the work:
//!
//! - [`PrefixIndex`](dictionary::PrefixIndex): an arena-backed trie over a
//!   fixed [`Alphabet`](dictionary::Alphabet), the authoritative store.
//! - [`RecencyCache`](cache::RecencyCache): a fixed-capacity, index-linked
//!   list ordered by recency, with per-entry hit counts for a frequency
//!   report.
//!
//! [`Directory`](directory::Directory) owns one of each and keeps them
//! consistent: the cache is filled lazily from the index and refreshed on
//! every insert.
//!
//! ## Example
//!
//! ```rust
//! use contactdir::prelude::*;
//!
//! let mut dir: Directory<Digits> = Directory::new(5);
//! dir.insert_contact("4155550100", ContactRecord::new("4155550100", "alice")).unwrap();
//! dir.insert_contact("4155550199", ContactRecord::new("4155550199", "alan")).unwrap();
//!
//! for (number, contact) in dir.search_by_prefix("4155550") {
//!     println!("{} -> {}", number, contact.name);
//! }
//!
//! dir.resolve("4155550199");
//! let top = dir.top_by_frequency(1);
//! assert_eq!(top[0].0, "4155550199");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod config;
pub mod contact;
pub mod dictionary;
pub mod directory;
pub mod error;

/// Interactive REPL over a directory
#[cfg(feature = "cli")]
pub mod repl;

/// CLI interface and utilities
#[cfg(feature = "cli")]
pub mod cli;

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::cache::{CacheEntry, CacheStats, RecencyCache};
    pub use crate::config::DirectoryConfig;
    pub use crate::contact::{ContactRecord, KeyScheme};
    pub use crate::dictionary::{Alphabet, Digits, Lowercase, PrefixIndex, PrefixIter};
    pub use crate::directory::{Directory, DirectoryContainer, DirectoryStats};
    pub use crate::error::{DirectoryError, InvalidKeyReason, Result};
}
