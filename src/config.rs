//! Directory configuration.

use crate::contact::KeyScheme;
use serde::{Deserialize, Serialize};

/// Default number of cached lookups, matching the frequency report size.
pub const DEFAULT_CACHE_CAPACITY: usize = 5;

/// Default number of rows in the frequency report.
pub const DEFAULT_TOP_LIMIT: usize = 5;

/// Settings for building a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Which record field is indexed
    pub key_scheme: KeyScheme,
    /// Maximum number of cached entries; zero disables the cache
    pub capacity: usize,
    /// Rows shown by the frequency report
    pub top_limit: usize,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            key_scheme: KeyScheme::Phone,
            capacity: DEFAULT_CACHE_CAPACITY,
            top_limit: DEFAULT_TOP_LIMIT,
        }
    }
}

impl DirectoryConfig {
    /// Overlays any values set in `overrides` onto this configuration.
    pub fn merge(
        mut self,
        key_scheme: Option<KeyScheme>,
        capacity: Option<usize>,
        top_limit: Option<usize>,
    ) -> Self {
        if let Some(scheme) = key_scheme {
            self.key_scheme = scheme;
        }
        if let Some(capacity) = capacity {
            self.capacity = capacity;
        }
        if let Some(limit) = top_limit {
            self.top_limit = limit;
        }
        self
    }
}
