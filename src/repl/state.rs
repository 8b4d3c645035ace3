//! REPL state management
//!
//! Holds the active directory and the settings it was built from, and owns
//! the raw-input normalisation that sits in front of the core.

use crate::config::DirectoryConfig;
use crate::contact::{ContactRecord, KeyScheme};
use crate::directory::DirectoryContainer;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, warn};

/// Strip common phone number separators: `(415) 555-0100` becomes `4155550100`.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '-' | ' ' | '(' | ')' | '.'))
        .collect()
}

/// Names are indexed lowercase.
pub fn normalize_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Outcome of importing a contacts file
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportReport {
    /// Contacts inserted
    pub inserted: usize,
    /// Line numbers (1-based) that could not be imported, with the reason
    pub rejected: Vec<(usize, String)>,
}

/// REPL state
#[derive(Debug)]
pub struct ReplState {
    /// Active directory
    pub directory: DirectoryContainer,
    /// Settings the directory was built from
    pub config: DirectoryConfig,
}

impl ReplState {
    /// Create a new REPL state with default settings
    pub fn new() -> Self {
        Self::with_config(DirectoryConfig::default())
    }

    /// Create a REPL state from settings
    pub fn with_config(config: DirectoryConfig) -> Self {
        Self {
            directory: DirectoryContainer::new(&config),
            config,
        }
    }

    /// Active key scheme
    pub fn scheme(&self) -> KeyScheme {
        self.directory.scheme()
    }

    /// Normalise user input into a key for the active scheme
    pub fn normalize_key(&self, raw: &str) -> String {
        match self.scheme() {
            KeyScheme::Phone => normalize_phone(raw),
            KeyScheme::Name => normalize_name(raw),
        }
    }

    /// Build a record from raw user input
    pub fn make_record(&self, phone: &str, name: &str) -> ContactRecord {
        ContactRecord::new(normalize_phone(phone), normalize_name(name))
    }

    /// Insert contacts from a file of `phone name` lines.
    ///
    /// Blank lines and lines starting with `#` are skipped. Fields may be
    /// separated by whitespace or a comma; the last field is the name and the
    /// rest form the phone number. Bad lines are reported, not fatal.
    pub fn import_file(&mut self, path: &Path) -> Result<ImportReport> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read contacts file: {}", path.display()))?;

        let mut report = ImportReport::default();
        for (number, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|field| !field.is_empty())
                .collect();

            let (phone, name) = match fields.as_slice() {
                [phone @ .., name] if !phone.is_empty() => (phone.join(" "), *name),
                _ => {
                    report
                        .rejected
                        .push((number + 1, "expected `phone name`".to_string()));
                    continue;
                }
            };

            let record = self.make_record(&phone, name);
            match self.directory.insert(record) {
                Ok(()) => report.inserted += 1,
                Err(e) => {
                    warn!(line = number + 1, error = %e, "skipping contact");
                    report.rejected.push((number + 1, e.to_string()));
                }
            }
        }

        debug!(
            path = %path.display(),
            inserted = report.inserted,
            rejected = report.rejected.len(),
            "imported contacts"
        );
        Ok(report)
    }

    /// Tear down and rebuild the directory with the current settings
    pub fn reset(&mut self) {
        self.directory.teardown();
        self.directory = DirectoryContainer::new(&self.config);
    }
}

impl Default for ReplState {
    fn default() -> Self {
        Self::new()
    }
}
