//! CLI argument definitions

use crate::config::DirectoryConfig;
use crate::contact::KeyScheme;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Top-level command line for the `contactdir` binary
#[derive(Parser, Debug)]
#[command(name = "contactdir")]
#[command(about = "Contact directory with prefix search and a recent-lookup cache")]
#[command(version)]
pub struct Cli {
    /// Custom configuration file path
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug events to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand; the REPL runs when none is given
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Directory settings that can be given on the command line
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Field the directory is keyed on
    #[arg(short, long)]
    pub key: Option<KeyScheme>,

    /// Number of recent lookups to cache (0 disables the cache)
    #[arg(short = 'n', long)]
    pub capacity: Option<usize>,

    /// Rows shown by the frequency report
    #[arg(short, long)]
    pub top: Option<usize>,
}

impl SettingsArgs {
    /// Overlay these arguments onto saved settings
    pub fn apply(&self, config: DirectoryConfig) -> DirectoryConfig {
        config.merge(self.key, self.capacity, self.top)
    }
}

/// Subcommands of `contactdir`
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the interactive directory (default)
    Repl {
        /// Overrides for the saved settings
        #[command(flatten)]
        settings: SettingsArgs,

        /// File of `phone name` lines to load at startup
        #[arg(short, long)]
        import: Option<PathBuf>,
    },

    /// Show or update saved settings
    Config {
        /// Overrides for the saved settings
        #[command(flatten)]
        settings: SettingsArgs,

        /// Print the settings after applying changes
        #[arg(short, long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_repl_settings() {
        let cli = Cli::try_parse_from([
            "contactdir", "-v", "repl", "--key", "name", "-n", "0", "-i", "contacts.txt",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Some(Commands::Repl { settings, import }) => {
                assert_eq!(settings.key, Some(KeyScheme::Name));
                assert_eq!(settings.capacity, Some(0));
                assert_eq!(import, Some(PathBuf::from("contacts.txt")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
