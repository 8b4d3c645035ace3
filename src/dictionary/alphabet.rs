//! Fixed key alphabets.
//!
//! Every trie node carries exactly `A::SIZE` child slots, so the alphabet
//! determines the branching factor and the enumeration order: children are
//! visited in ascending slot index.

/// A fixed, ordered set of key symbols.
pub trait Alphabet: Clone + Copy + Send + Sync + 'static {
    /// Number of symbols (and child slots per node).
    const SIZE: usize;

    /// Human-readable name, used in diagnostics.
    const NAME: &'static str;

    /// Key length required by default, if any.
    const DEFAULT_KEY_LENGTH: Option<usize>;

    /// Maps a symbol to its slot, or `None` if it is outside the alphabet.
    fn index_of(symbol: char) -> Option<usize>;

    /// Maps a slot back to its symbol.
    ///
    /// `index` must be less than `SIZE`.
    fn symbol_at(index: usize) -> char;
}

/// Decimal digits `0`-`9`, used for phone numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Digits;

impl Alphabet for Digits {
    const SIZE: usize = 10;
    const NAME: &'static str = "digits";
    const DEFAULT_KEY_LENGTH: Option<usize> = Some(10);

    #[inline]
    fn index_of(symbol: char) -> Option<usize> {
        symbol.to_digit(10).map(|d| d as usize)
    }

    #[inline]
    fn symbol_at(index: usize) -> char {
        (b'0' + index as u8) as char
    }
}

/// Lowercase ASCII letters `a`-`z`, used for names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lowercase;

impl Alphabet for Lowercase {
    const SIZE: usize = 26;
    const NAME: &'static str = "lowercase";
    const DEFAULT_KEY_LENGTH: Option<usize> = None;

    #[inline]
    fn index_of(symbol: char) -> Option<usize> {
        if symbol.is_ascii_lowercase() {
            Some((symbol as u8 - b'a') as usize)
        } else {
            None
        }
    }

    #[inline]
    fn symbol_at(index: usize) -> char {
        (b'a' + index as u8) as char
    }
}
