//! Rustyline helper integration
//!
//! Command-name completion, history hints and highlighting of the command word.

use super::command::COMMAND_NAMES;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Context, Helper};
use std::borrow::Cow;

/// REPL helper
pub struct ContactHelper {
    hinter: HistoryHinter,
}

impl ContactHelper {
    /// Create a new helper instance
    pub fn new() -> Self {
        Self {
            hinter: HistoryHinter::new(),
        }
    }

    fn command_candidates(prefix: &str, trailing_space: bool) -> Vec<Pair> {
        COMMAND_NAMES
            .iter()
            .filter(|cmd| cmd.starts_with(prefix))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: if trailing_space {
                    format!("{} ", cmd)
                } else {
                    cmd.to_string()
                },
            })
            .collect()
    }
}

impl Default for ContactHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Helper for ContactHelper {}

impl Completer for ContactHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> Result<(usize, Vec<Pair>), ReadlineError> {
        let line = &line[..pos];
        let parts: Vec<&str> = line.split_whitespace().collect();

        if parts.is_empty() {
            return Ok((0, Self::command_candidates("", true)));
        }

        let start = line.rfind(char::is_whitespace).map(|i| i + 1).unwrap_or(0);

        if parts.len() == 1 && !line.ends_with(char::is_whitespace) {
            let prefix = parts[0].to_lowercase();
            return Ok((start, Self::command_candidates(&prefix, true)));
        }

        // Contacts and file paths are not completed; only help topics are.
        match parts[0].to_lowercase().as_str() {
            "help" | "?" if parts.len() <= 2 => {
                let prefix = if line.ends_with(char::is_whitespace) {
                    String::new()
                } else {
                    parts.last().map(|s| s.to_lowercase()).unwrap_or_default()
                };
                Ok((start, Self::command_candidates(&prefix, false)))
            }
            _ => Ok((0, vec![])),
        }
    }
}

impl Hinter for ContactHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<Self::Hint> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Highlighter for ContactHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let trimmed = line.trim_start();
        let word_end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
        let word = &trimmed[..word_end];

        if !COMMAND_NAMES.contains(&word.to_lowercase().as_str()) {
            return Cow::Borrowed(line);
        }

        let indent = line.len() - trimmed.len();
        Cow::Owned(format!(
            "{}{}{}",
            &line[..indent],
            word.blue().bold(),
            &trimmed[word_end..]
        ))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Validator for ContactHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}
