//! Interactive REPL for the contact directory
//!
//! Reads one command per line, runs it against a [`ReplState`] and prints the
//! result. Line editing, history and completion come from rustyline.

pub mod command;
pub mod helper;
pub mod state;

pub use command::{Command, CommandResult, COMMAND_NAMES};
pub use helper::ContactHelper;
pub use state::{ImportReport, ReplState};

/// REPL configuration
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Prompt string
    pub prompt: String,
    /// History file path
    pub history_file: Option<std::path::PathBuf>,
    /// Maximum history entries
    pub max_history: usize,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "contacts> ".to_string(),
            history_file: dirs::home_dir().map(|home| home.join(".contactdir_history")),
            max_history: 1000,
        }
    }
}
