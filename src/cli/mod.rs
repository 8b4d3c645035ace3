//! CLI interface for contactdir
//!
//! Argument parsing, logging setup and settings persistence for the binary.

pub mod args;
pub mod logging;
pub mod paths;

pub use args::{Cli, Commands, SettingsArgs};
pub use paths::{config_dir, config_file_path, load_config, save_config};
