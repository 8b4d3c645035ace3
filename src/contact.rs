//! Contact records and key schemes.

use crate::dictionary::alphabet::{Alphabet, Digits, Lowercase};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single directory entry.
///
/// Whichever field the [`KeyScheme`] selects is indexed; the other one is
/// carried along as an opaque payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContactRecord {
    /// Phone number, digits only once normalised.
    pub phone: String,
    /// Contact name.
    pub name: String,
}

impl ContactRecord {
    /// Creates a record from a phone number and a name.
    pub fn new(phone: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ContactRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.phone)
    }
}

/// Which record field a directory is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum KeyScheme {
    /// Keyed on the phone number over the [`Digits`] alphabet.
    #[default]
    Phone,
    /// Keyed on the name over the [`Lowercase`] alphabet.
    Name,
}

impl KeyScheme {
    /// Extracts the key field from a record.
    pub fn key_of<'a>(&self, record: &'a ContactRecord) -> &'a str {
        match self {
            KeyScheme::Phone => &record.phone,
            KeyScheme::Name => &record.name,
        }
    }

    /// Name of the alphabet backing this scheme.
    pub fn alphabet_name(&self) -> &'static str {
        match self {
            KeyScheme::Phone => Digits::NAME,
            KeyScheme::Name => Lowercase::NAME,
        }
    }
}

impl fmt::Display for KeyScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyScheme::Phone => write!(f, "phone"),
            KeyScheme::Name => write!(f, "name"),
        }
    }
}

impl std::str::FromStr for KeyScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "phone" | "number" | "digits" => Ok(KeyScheme::Phone),
            "name" | "names" => Ok(KeyScheme::Name),
            other => Err(format!("unknown key scheme '{}'", other)),
        }
    }
}
