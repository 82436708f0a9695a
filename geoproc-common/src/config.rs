//! Configuration file discovery and TOML loading
//!
//! Every service resolves its bootstrap TOML file in the same order:
//! 1. Explicit path (command-line argument)
//! 2. Environment variable
//! 3. Per-user config directory (`~/.config/geoproc/config.toml` on Linux)
//! 4. System-wide `/etc/geoproc/config.toml` (Unix only)
//!
//! A missing file is not an error: callers fall back to built-in defaults.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Directory name used under the platform config directory
pub const CONFIG_DIR_NAME: &str = "geoproc";

/// Default config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Resolve the configuration file path.
///
/// An explicit path or environment variable is returned even if the file
/// does not exist, so that the caller can report it. The well-known locations
/// are only returned when present on disk.
pub fn resolve_config_path(cli_arg: Option<&Path>, env_var_name: &str) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3 and 4: well-known locations
    default_config_paths().into_iter().find(|p| p.exists())
}

/// Candidate config file locations for the current platform, highest
/// priority first
pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME));
    }

    if cfg!(unix) {
        paths.push(PathBuf::from("/etc").join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME));
    }

    paths
}

/// Load and parse a TOML file into `T`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and [`Error::Toml`] if it
/// does not parse into `T`.
pub async fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = tokio::fs::read_to_string(path).await?;
    let parsed = toml::from_str(&contents)?;
    info!("Loaded TOML configuration from {}", path.display());
    Ok(parsed)
}

/// Load `T` from the resolved config file, or fall back to `T::default()`.
///
/// Only a missing file degrades to defaults (with a warning). A file that
/// exists but cannot be read or parsed is reported as an error.
pub async fn load_toml_or_default<T>(path: Option<&Path>) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let Some(path) = path else {
        warn!("No configuration file found, using built-in defaults");
        return Ok(T::default());
    };

    match load_toml(path).await {
        Ok(config) => Ok(config),
        Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(
                "Configuration file {} not found, using built-in defaults",
                path.display()
            );
            Ok(T::default())
        }
        Err(e) => Err(Error::Config(format!(
            "Failed to load {}: {}",
            path.display(),
            e
        ))),
    }
}
