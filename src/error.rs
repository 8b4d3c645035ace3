//! Error types for directory operations.
//!
//! Absence of a contact is never an error: lookups return `None` or an empty
//! sequence. The only failure is a key that cannot be indexed.

use std::fmt;
use thiserror::Error;

/// Why a key was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidKeyReason {
    /// The key has no symbols.
    Empty,
    /// A symbol lies outside the alphabet.
    InvalidSymbol {
        /// The offending symbol
        symbol: char,
        /// Its position in the key (in symbols, not bytes)
        position: usize,
    },
    /// The key length does not match the length the index requires.
    WrongLength {
        /// Required number of symbols
        expected: usize,
        /// Number of symbols supplied
        actual: usize,
    },
}

impl fmt::Display for InvalidKeyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidKeyReason::Empty => write!(f, "key is empty"),
            InvalidKeyReason::InvalidSymbol { symbol, position } => {
                write!(f, "symbol {:?} at position {} is not in the alphabet", symbol, position)
            }
            InvalidKeyReason::WrongLength { expected, actual } => {
                write!(f, "expected {} symbols, got {}", expected, actual)
            }
        }
    }
}

/// Errors that can occur while mutating a directory.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// The key is malformed for the index alphabet.
    ///
    /// Raised before any mutation takes place, so the caller can re-prompt
    /// and retry with the structures untouched.
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey {
        /// The rejected key
        key: String,
        /// What was wrong with it
        reason: InvalidKeyReason,
    },
}

impl DirectoryError {
    pub(crate) fn invalid_key(key: &str, reason: InvalidKeyReason) -> Self {
        DirectoryError::InvalidKey {
            key: key.to_string(),
            reason,
        }
    }
}

/// A specialized `Result` type for directory operations.
pub type Result<T> = std::result::Result<T, DirectoryError>;
