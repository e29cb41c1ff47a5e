//! `config.toml` loading.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use naible_core::config::{AppConfig, LlmProvider};
use naible_core::{NaibleError, Result};

use crate::paths::NaiblePaths;

pub const AZURE_ENDPOINT_ENV: &str = "AZURE_OPENAI_ENDPOINT";
pub const AZURE_DEPLOYMENT_ENV: &str = "AZURE_OPENAI_DEPLOYMENT";

/// Reads [`AppConfig`] from a TOML file.
///
/// A missing file yields defaults; a malformed one is an error.
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Storage for the default `config.toml`.
    pub fn new() -> Result<Self> {
        let path = NaiblePaths::config_file().map_err(|e| NaibleError::config(e.to_string()))?;
        Ok(Self { path })
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the file without environment overrides.
    pub fn load_file(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "[Config] No config file, using defaults");
            return Ok(AppConfig::default());
        }
        let content = fs::read_to_string(&self.path)?;
        toml::from_str(&content).map_err(|e| {
            NaibleError::config(format!("{}: {}", self.path.display(), e))
        })
    }

    /// Loads the file and applies `AZURE_OPENAI_ENDPOINT` / `AZURE_OPENAI_DEPLOYMENT`.
    pub fn load(&self) -> Result<AppConfig> {
        let mut config = self.load_file()?;
        apply_env(&mut config, |name| env::var(name).ok());
        Ok(config)
    }
}

/// An Azure endpoint in the environment also selects the Azure provider.
fn apply_env(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(endpoint) = lookup(AZURE_ENDPOINT_ENV).filter(|v| !v.trim().is_empty()) {
        config.llm.provider = LlmProvider::Azure;
        config.llm.endpoint = endpoint.trim().to_string();
    }
    if let Some(deployment) = lookup(AZURE_DEPLOYMENT_ENV).filter(|v| !v.trim().is_empty()) {
        config.llm.deployment = deployment.trim().to_string();
    }
}
