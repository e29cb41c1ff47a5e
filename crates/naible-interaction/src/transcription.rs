//! Speech-to-text implementations.

use std::sync::Arc;

use async_trait::async_trait;
use naible_core::config::{LlmProvider, SecretConfig, TranscriptionSettings};
use naible_core::generation::{AudioClip, Transcriber};
use naible_core::selector::{VariantSelector, pick};
use naible_core::{NaibleError, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Request};
use serde::Deserialize;

/// Whisper-compatible `/audio/transcriptions` client.
#[derive(Clone)]
pub struct WhisperTranscriber {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl WhisperTranscriber {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Builds a transcriber from configuration, using the OpenAI key.
    ///
    /// Returns `None` when no key is configured.
    pub fn from_settings(settings: &TranscriptionSettings, secrets: &SecretConfig) -> Option<Self> {
        secrets
            .key_for(LlmProvider::OpenAi)
            .map(|key| Self::new(&settings.endpoint, key, &settings.model))
    }

    fn url(&self) -> String {
        format!(
            "{}/audio/transcriptions",
            self.endpoint.trim_end_matches('/')
        )
    }

    fn build_request(&self, audio: AudioClip) -> Result<Request> {
        let part = Part::bytes(audio.bytes)
            .file_name(audio.file_name)
            .mime_str(&audio.mime_type)
            .map_err(|e| NaibleError::validation(format!("Invalid audio type: {e}")))?;
        let form = Form::new()
            .part("file", part)
            .text("model", self.model.clone());

        self.client
            .post(self.url())
            .bearer_auth(&self.api_key)
            .multipart(form)
            .build()
            .map_err(|e| NaibleError::internal(e.to_string()))
    }
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    async fn transcribe(&self, audio: AudioClip) -> Result<String> {
        if audio.is_empty() {
            return Err(NaibleError::validation("No audio file provided"));
        }

        tracing::debug!(bytes = audio.bytes.len(), "[Transcription] Uploading audio");
        let request = self.build_request(audio)?;
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| NaibleError::upstream(format!("Transcription request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NaibleError::upstream(format!(
                "Transcription failed with HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }

        let parsed: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| NaibleError::upstream(format!("Invalid transcription response: {e}")))?;
        Ok(parsed.text)
    }
}

/// Canned transcripts for demos and tests.
pub const SCRIPTED_TRANSCRIPTS: [&str; 10] = [
    "I want to explore how AI can help me streamline my design workflow and automate repetitive tasks",
    "I value privacy, security, and the ability to customize my tools to fit my specific needs",
    "I'm looking for a personal AI assistant that respects my data privacy while helping me organize my work and personal life",
    "I need an AI solution that can help my team collaborate more effectively while maintaining security compliance",
    "Innovation, transparency, and ethical AI use are extremely important to me in any technology I adopt",
    "I'm exploring AI options that can help with content creation while maintaining my brand's unique voice",
    "I want to explore AI for my business",
    "I value privacy, security, and innovation",
    "I'm looking for a personal AI assistant that respects my privacy",
    "I prefer solutions that are customizable and intuitive",
];

/// Returns one of a fixed set of transcripts, ignoring the audio content.
///
/// For tests and offline demos only; the server never wires it in.
pub struct ScriptedTranscriber {
    transcripts: Vec<String>,
    selector: Arc<dyn VariantSelector>,
}

impl ScriptedTranscriber {
    pub fn new(selector: Arc<dyn VariantSelector>) -> Self {
        Self {
            transcripts: SCRIPTED_TRANSCRIPTS.iter().map(|t| t.to_string()).collect(),
            selector,
        }
    }

    pub fn with_transcripts(mut self, transcripts: Vec<String>) -> Self {
        self.transcripts = transcripts;
        self
    }
}

#[async_trait]
impl Transcriber for ScriptedTranscriber {
    async fn transcribe(&self, audio: AudioClip) -> Result<String> {
        if audio.is_empty() {
            return Err(NaibleError::validation("No audio file provided"));
        }
        pick(self.selector.as_ref(), &self.transcripts)
            .cloned()
            .ok_or_else(|| NaibleError::internal("No scripted transcripts configured"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use naible_core::config::ApiKeyConfig;
    use naible_core::selector::FixedSelector;

    #[test]
    fn test_whisper_request_shape() {
        let transcriber = WhisperTranscriber::new("https://api.openai.com/v1/", "sk-t", "whisper-1");
        let request = transcriber
            .build_request(AudioClip::webm(vec![1, 2, 3]))
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://api.openai.com/v1/audio/transcriptions"
        );
        assert_eq!(request.headers().get("authorization").unwrap(), "Bearer sk-t");
        let content_type = request
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(content_type.starts_with("multipart/form-data"));
    }

    #[test]
    fn test_from_settings_needs_openai_key() {
        let settings = TranscriptionSettings::default();
        assert!(WhisperTranscriber::from_settings(&settings, &SecretConfig::default()).is_none());

        let secrets = SecretConfig {
            openai: Some(ApiKeyConfig::new("sk-1")),
            azure: None,
        };
        assert!(WhisperTranscriber::from_settings(&settings, &secrets).is_some());
    }

    #[tokio::test]
    async fn test_whisper_rejects_empty_audio_without_network() {
        let transcriber = WhisperTranscriber::new("http://127.0.0.1:9", "k", "whisper-1");
        let err = transcriber
            .transcribe(AudioClip::webm(Vec::new()))
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_scripted_transcriber_uses_selector() {
        let transcriber = ScriptedTranscriber::new(Arc::new(FixedSelector(6)));
        let text = transcriber
            .transcribe(AudioClip::webm(vec![0u8; 16]))
            .await
            .unwrap();
        assert_eq!(text, "I want to explore AI for my business");
    }

    #[tokio::test]
    async fn test_scripted_transcriber_custom_script() {
        let transcriber = ScriptedTranscriber::new(Arc::new(FixedSelector(1)))
            .with_transcripts(vec!["one".into(), "two".into()]);
        let text = transcriber.transcribe(AudioClip::webm(vec![1])).await.unwrap();
        assert_eq!(text, "two");

        let empty =
            ScriptedTranscriber::new(Arc::new(FixedSelector(0))).with_transcripts(Vec::new());
        assert!(empty.transcribe(AudioClip::webm(vec![1])).await.is_err());
    }
}
