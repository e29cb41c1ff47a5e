//! Configuration models.
//!
//! `AppConfig` mirrors `config.toml`; `SecretConfig` mirrors `secret.json`.
//! Every field has a default so a missing or partial file still loads.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1";
pub const DEFAULT_AZURE_API_VERSION: &str = "2025-01-01-preview";
pub const DEFAULT_AZURE_DEPLOYMENT: &str = "gpt-4.1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-1";
pub const DEFAULT_ASSEMBLY_DELAY_MS: u64 = 5000;
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Hosted chat-completion flavour.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LlmProvider {
    /// api.openai.com with a bearer token.
    #[default]
    OpenAi,
    /// Azure OpenAI deployment with an `api-key` header.
    Azure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    /// Base URL. For Azure this is the resource endpoint
    /// (`https://<resource>.openai.azure.com`).
    pub endpoint: String,
    /// Azure deployment name.
    pub deployment: String,
    /// Azure `api-version` query parameter.
    pub api_version: String,
    /// Model name sent to the OpenAI provider.
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: LlmProvider::OpenAi,
            endpoint: DEFAULT_OPENAI_ENDPOINT.to_string(),
            deployment: DEFAULT_AZURE_DEPLOYMENT.to_string(),
            api_version: DEFAULT_AZURE_API_VERSION.to_string(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 500,
            timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    /// Base URL of the OpenAI-compatible audio API.
    pub endpoint: String,
    pub model: String,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_OPENAI_ENDPOINT.to_string(),
            model: DEFAULT_TRANSCRIPTION_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowSettings {
    /// How long the site-assembly step lasts before the hero is shown.
    pub assembly_delay_ms: u64,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            assembly_delay_ms: DEFAULT_ASSEMBLY_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Overrides the platform data directory.
    pub data_dir: Option<PathBuf>,
}

/// Root of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub llm: LlmSettings,
    pub transcription: TranscriptionSettings,
    pub flow: FlowSettings,
    pub server: ServerSettings,
    pub storage: StorageSettings,
}

/// A single API key entry in `secret.json`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyConfig {
    pub api_key: String,
}

impl ApiKeyConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// The key, if it is non-blank.
    pub fn key(&self) -> Option<&str> {
        let key = self.api_key.trim();
        (!key.is_empty()).then_some(key)
    }
}

impl fmt::Debug for ApiKeyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyConfig")
            .field("api_key", &if self.key().is_some() { "<redacted>" } else { "<empty>" })
            .finish()
    }
}

/// Root of `secret.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub azure: Option<ApiKeyConfig>,
    #[serde(default)]
    pub openai: Option<ApiKeyConfig>,
}

impl SecretConfig {
    /// Key for the given provider, if configured.
    pub fn key_for(&self, provider: LlmProvider) -> Option<&str> {
        match provider {
            LlmProvider::Azure => self.azure.as_ref().and_then(ApiKeyConfig::key),
            LlmProvider::OpenAi => self.openai.as_ref().and_then(ApiKeyConfig::key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.flow.assembly_delay_ms, 5000);
        assert_eq!(config.llm.provider, LlmProvider::OpenAi);
        assert_eq!(config.llm.timeout_secs, 30);
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [llm]
            provider = "azure"
            endpoint = "https://example.openai.azure.com"
            max_tokens = 800

            [server]
            bind = "0.0.0.0:8080"
            "#,
        )
        .unwrap();
        assert_eq!(config.llm.provider, LlmProvider::Azure);
        assert_eq!(config.llm.max_tokens, 800);
        assert_eq!(config.llm.api_version, DEFAULT_AZURE_API_VERSION);
        assert_eq!(config.server.bind, "0.0.0.0:8080");
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        let secret = SecretConfig {
            openai: Some(ApiKeyConfig::new("sk-very-secret")),
            azure: None,
        };
        let printed = format!("{secret:?}");
        assert!(!printed.contains("sk-very-secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_blank_key_is_ignored() {
        let secret = SecretConfig {
            azure: Some(ApiKeyConfig::new("  ")),
            openai: Some(ApiKeyConfig::new("sk-1")),
        };
        assert_eq!(secret.key_for(LlmProvider::Azure), None);
        assert_eq!(secret.key_for(LlmProvider::OpenAi), Some("sk-1"));
    }
}
