//! Composition root.
//!
//! Loads configuration and secrets, opens the storage file and wires the
//! services into an [`AppState`]. Both the server and the CLI start here.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use naible_application::ControllerOptions;
use naible_core::config::{AppConfig, SecretConfig};
use naible_core::generation::Transcriber;
use naible_core::selector::RandomSelector;
use naible_infrastructure::{ConfigStorage, FileKeyValueStore, NaiblePaths, SecretStorage};
use naible_interaction::{
    ChatCompletion, ChatError, CompletionOptions, LlmContentGenerator, OpenAiChatClient,
    WhisperTranscriber,
};

use crate::state::{AppState, StateParts};

pub fn load_config() -> anyhow::Result<AppConfig> {
    let storage = ConfigStorage::new()?;
    let config = storage
        .load()
        .with_context(|| format!("Failed to load {}", storage.path().display()))?;
    Ok(config)
}

pub fn load_secrets() -> anyhow::Result<SecretConfig> {
    let storage = SecretStorage::new()?;
    Ok(storage.load_with_env())
}

/// `storage.json` under the configured or platform data directory.
pub fn storage_file(config: &AppConfig) -> anyhow::Result<PathBuf> {
    let data_dir = match &config.storage.data_dir {
        Some(dir) => dir.clone(),
        None => NaiblePaths::data_dir()?,
    };
    Ok(NaiblePaths::storage_file_in(data_dir))
}

fn chat_client(
    config: &AppConfig,
    secrets: &SecretConfig,
) -> anyhow::Result<Option<Arc<dyn ChatCompletion>>> {
    match OpenAiChatClient::from_settings(&config.llm, secrets) {
        Ok(client) => {
            tracing::info!(provider = %client.provider(), "[Bootstrap] LLM client configured");
            let client: Arc<dyn ChatCompletion> = Arc::new(client);
            Ok(Some(client))
        }
        Err(ChatError::MissingKey(provider)) => {
            tracing::warn!(
                provider = %provider,
                "[Bootstrap] No API key configured, generated content will use fallback copy"
            );
            Ok(None)
        }
        Err(e) => Err(e).context("Failed to configure LLM client"),
    }
}

fn transcriber(config: &AppConfig, secrets: &SecretConfig) -> Option<Arc<dyn Transcriber>> {
    match WhisperTranscriber::from_settings(&config.transcription, secrets) {
        Some(whisper) => {
            tracing::info!("[Bootstrap] Whisper transcription configured");
            let whisper: Arc<dyn Transcriber> = Arc::new(whisper);
            Some(whisper)
        }
        None => {
            tracing::warn!("[Bootstrap] No OpenAI key, audio transcription is unavailable");
            None
        }
    }
}

/// Builds the application state for `config`.
///
/// Ensures an anonymous user exists and publishes the initial theme.
pub fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let secrets = load_secrets()?;
    let storage_path = storage_file(config)?;
    tracing::debug!(path = %storage_path.display(), "[Bootstrap] Opening storage");

    let generator = LlmContentGenerator::new(chat_client(config, &secrets)?)?
        .with_options(CompletionOptions::from(&config.llm));

    let state = AppState::assemble(StateParts {
        store: Arc::new(FileKeyValueStore::new(storage_path)),
        generator: Arc::new(generator),
        transcriber: transcriber(config, &secrets),
        selector: Arc::new(RandomSelector),
        controller: ControllerOptions::from_flow(&config.flow),
    })?;

    state.users.ensure_user()?;
    state.personalization.publish()?;
    Ok(state)
}

/// Loads the config and builds the state in one go.
pub fn bootstrap() -> anyhow::Result<(AppConfig, Arc<AppState>)> {
    let config = load_config()?;
    let state = build_state(&config)?;
    Ok((config, Arc::new(state)))
}
