//! Unified path management for Naible configuration and data files.
//!
//! Resolved through the `dirs` crate so the layout follows each platform's
//! conventions. `NAIBLE_CONFIG_DIR` and `NAIBLE_DATA_DIR` override the roots.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

pub const CONFIG_DIR_ENV: &str = "NAIBLE_CONFIG_DIR";
pub const DATA_DIR_ENV: &str = "NAIBLE_DATA_DIR";

const APP_DIR: &str = "naible";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Platform directory could not be determined.
    #[error("Cannot determine the {0} directory")]
    DirNotFound(&'static str),
}

/// Path layout.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/naible/            # Config directory
/// ├── config.toml              # Application configuration
/// ├── secret.json              # API keys
/// └── logs/                    # Application logs
///     └── naible.log.YYYY-MM-DD
///
/// ~/.local/share/naible/       # Data directory
/// └── storage.json             # Key/value store (browser local storage equivalent)
/// ```
pub struct NaiblePaths;

impl NaiblePaths {
    fn override_dir(var: &str) -> Option<PathBuf> {
        env::var_os(var)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }

    /// Returns the Naible configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/naible/`)
    /// - `Err(PathError::DirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        if let Some(dir) = Self::override_dir(CONFIG_DIR_ENV) {
            return Ok(dir);
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::DirNotFound("config"))
    }

    /// Returns the Naible data directory.
    pub fn data_dir() -> Result<PathBuf, PathError> {
        if let Some(dir) = Self::override_dir(DATA_DIR_ENV) {
            return Ok(dir);
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::DirNotFound("data"))
    }

    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to prevent
    /// unauthorized access.
    pub fn secret_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("secret.json"))
    }

    /// Returns the path to the key/value store file under `data_dir`.
    pub fn storage_file_in(data_dir: impl Into<PathBuf>) -> PathBuf {
        data_dir.into().join("storage.json")
    }

    pub fn storage_file() -> Result<PathBuf, PathError> {
        Ok(Self::storage_file_in(Self::data_dir()?))
    }

    pub fn logs_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("logs"))
    }
}
