//! Secret configuration file storage.
//!
//! Loads API keys from `secret.json`, falling back to environment variables.
//! No key ever has a compiled-in default.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use naible_core::config::{ApiKeyConfig, LlmProvider, SecretConfig};
use thiserror::Error;

use crate::paths::NaiblePaths;

pub const AZURE_API_KEY_ENV: &str = "AZURE_OPENAI_API_KEY";
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Errors that can occur during secret storage operations.
#[derive(Debug, Error)]
pub enum SecretStorageError {
    #[error("Secret file not found at: {}", .0.display())]
    NotFound(PathBuf),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Could not determine config directory")]
    ConfigDirNotFound,
}

/// Storage for `secret.json`.
///
/// # Security Note
///
/// The file is plaintext JSON. [`SecretStorage::ensure_template`] creates it
/// with mode 600 on Unix. Keys are never logged.
pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    /// Creates a storage pointing at the default `secret.json`.
    pub fn new() -> Result<Self, SecretStorageError> {
        let path = NaiblePaths::secret_file().map_err(|_| SecretStorageError::ConfigDirNotFound)?;
        Ok(Self { path })
    }

    /// Creates a storage with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and parses the secret file.
    pub fn load(&self) -> Result<SecretConfig, SecretStorageError> {
        if !self.path.exists() {
            return Err(SecretStorageError::NotFound(self.path.clone()));
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Loads the file if present and fills missing keys from the environment.
    ///
    /// A malformed file is reported and ignored; the environment still applies.
    pub fn load_with_env(&self) -> SecretConfig {
        let mut config = match self.load() {
            Ok(config) => config,
            Err(SecretStorageError::NotFound(_)) => SecretConfig::default(),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "[Secrets] Could not read secret file, using environment only"
                );
                SecretConfig::default()
            }
        };
        apply_env(&mut config, |name| env::var(name).ok());
        config
    }

    /// Creates an empty template with mode 600 if the file does not exist.
    pub fn ensure_template(&self) -> Result<(), SecretStorageError> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let template = SecretConfig {
            azure: Some(ApiKeyConfig::default()),
            openai: Some(ApiKeyConfig::default()),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&template)?)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }
}

/// Fills providers that have no usable key from `lookup`.
fn apply_env(config: &mut SecretConfig, lookup: impl Fn(&str) -> Option<String>) {
    for (provider, var) in [
        (LlmProvider::Azure, AZURE_API_KEY_ENV),
        (LlmProvider::OpenAi, OPENAI_API_KEY_ENV),
    ] {
        if config.key_for(provider).is_some() {
            continue;
        }
        if let Some(value) = lookup(var).filter(|v| !v.trim().is_empty()) {
            let entry = Some(ApiKeyConfig::new(value));
            match provider {
                LlmProvider::Azure => config.azure = entry,
                LlmProvider::OpenAi => config.openai = entry,
            }
        }
    }
}
