//! Configuration directory and settings file management

use crate::config::DirectoryConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Get the configuration directory for contactdir
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine configuration directory")?;
    Ok(base.join("contactdir"))
}

/// Get the default settings file path
pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Resolve the settings path, preferring an explicit override
pub fn config_file_path(custom_path: Option<&Path>) -> Result<PathBuf> {
    match custom_path {
        Some(path) => {
            validate_config_path(path)?;
            Ok(path.to_path_buf())
        }
        None => default_config_path(),
    }
}

/// Validate that a config file path has .json extension
pub fn validate_config_path(path: &Path) -> Result<()> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => Ok(()),
        Some(ext) => Err(anyhow::anyhow!(
            "Config file must have .json extension, got .{}",
            ext
        )),
        None => Err(anyhow::anyhow!(
            "Config file must have .json extension. Please add .json to the filename."
        )),
    }
}

/// Load settings, falling back to defaults when no file exists yet
pub fn load_config(path: &Path) -> Result<DirectoryConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "no settings file, using defaults");
        return Ok(DirectoryConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Save settings, creating parent directories as needed
pub fn save_config(path: &Path, config: &DirectoryConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    let contents = serde_json::to_string_pretty(config)?;
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    debug!(path = %path.display(), "saved settings");
    Ok(())
}
