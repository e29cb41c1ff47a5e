//! Content generation and transcription seams.

use async_trait::async_trait;

use crate::content::PersonalizedContent;
use crate::error::Result;
use crate::preferences::UserPreferences;

/// Produces hero copy for a set of preferences.
///
/// Implementations never fail: any upstream problem is absorbed into a
/// fallback block.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, preferences: &UserPreferences) -> PersonalizedContent;
}

/// Answers a free-form prompt with the raw model text.
#[async_trait]
pub trait PromptProcessor: Send + Sync {
    async fn process(&self, prompt: &str, preferences: &UserPreferences) -> Result<String>;
}

/// Recorded audio handed to a [`Transcriber`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
}

impl AudioClip {
    /// A browser-style `audio.webm` recording.
    pub fn webm(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            file_name: "audio.webm".to_string(),
            mime_type: "audio/webm".to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Speech-to-text.
///
/// Real implementations surface failures; they never invent text.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: AudioClip) -> Result<String>;
}
