//! LLM-backed hero-copy generation with canned fallback.

use std::sync::Arc;

use async_trait::async_trait;
use naible_core::NaibleError;
use naible_core::content::{FALLBACK_COUNT, PersonalizedContent};
use naible_core::generation::{ContentGenerator, PromptProcessor};
use naible_core::preferences::UserPreferences;
use naible_core::selector::{FixedSelector, VariantSelector};
use serde::Deserialize;
use thiserror::Error;

use crate::chat_client::{ChatCompletion, ChatError, ChatMessage, CompletionOptions};
use crate::prompts::{PromptTemplates, SYSTEM_PROMPT};

/// Generates [`PersonalizedContent`] through a [`ChatCompletion`] client.
///
/// Without a client (no API key configured) every call returns fallback
/// copy. Fallback blocks are chosen by the injected [`VariantSelector`];
/// the default always picks block 0.
pub struct LlmContentGenerator {
    client: Option<Arc<dyn ChatCompletion>>,
    selector: Arc<dyn VariantSelector>,
    options: CompletionOptions,
    templates: PromptTemplates,
}

impl LlmContentGenerator {
    pub fn new(client: Option<Arc<dyn ChatCompletion>>) -> naible_core::Result<Self> {
        Ok(Self {
            client,
            selector: Arc::new(FixedSelector(0)),
            options: CompletionOptions::default(),
            templates: PromptTemplates::new()?,
        })
    }

    pub fn with_selector(mut self, selector: Arc<dyn VariantSelector>) -> Self {
        self.selector = selector;
        self
    }

    pub fn with_options(mut self, options: CompletionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    fn fallback(&self) -> PersonalizedContent {
        PersonalizedContent::fallback(self.selector.select(FALLBACK_COUNT))
    }

    async fn try_generate(
        &self,
        client: &dyn ChatCompletion,
        preferences: &UserPreferences,
    ) -> Result<PersonalizedContent, GenerationFailure> {
        let prompt = self
            .templates
            .content_prompt(preferences)
            .map_err(GenerationFailure::Prompt)?;
        let messages = [ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)];

        let reply = client
            .complete(&messages, self.options)
            .await
            .map_err(GenerationFailure::Chat)?;

        parse_content_reply(&reply).ok_or(GenerationFailure::Unparseable)
    }
}

#[derive(Debug, Error)]
enum GenerationFailure {
    #[error(transparent)]
    Prompt(NaibleError),
    #[error(transparent)]
    Chat(ChatError),
    #[error("reply is not a complete content block")]
    Unparseable,
}

#[async_trait]
impl ContentGenerator for LlmContentGenerator {
    async fn generate(&self, preferences: &UserPreferences) -> PersonalizedContent {
        let Some(client) = self.client.as_deref() else {
            tracing::warn!("[Content] No chat client configured, using fallback copy");
            return self.fallback();
        };

        match self.try_generate(client, preferences).await {
            Ok(content) => {
                tracing::info!(headline = %content.headline, "[Content] Generated hero copy");
                content
            }
            Err(e) => {
                tracing::warn!(error = %e, "[Content] Generation failed, using fallback copy");
                self.fallback()
            }
        }
    }
}

#[async_trait]
impl PromptProcessor for LlmContentGenerator {
    async fn process(
        &self,
        prompt: &str,
        preferences: &UserPreferences,
    ) -> naible_core::Result<String> {
        let client = self
            .client
            .as_deref()
            .ok_or_else(|| NaibleError::Security("No API key configured".to_string()))?;

        let user_message = self.templates.process_prompt(prompt, preferences)?;
        let messages = [
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(user_message),
        ];

        client
            .complete(&messages, self.options)
            .await
            .map_err(|e| NaibleError::upstream(e.to_string()))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContentReply {
    headline: Option<String>,
    subheading: Option<String>,
    cta_text: Option<String>,
    welcome_message: Option<String>,
}

/// Parses a model reply into content.
///
/// Tolerates a fenced code block or prose around the JSON object by taking
/// the outermost `{...}`. Returns `None` unless all four fields are present
/// and non-blank.
pub fn parse_content_reply(reply: &str) -> Option<PersonalizedContent> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    if end < start {
        return None;
    }

    let parsed: ContentReply = serde_json::from_str(&reply[start..=end]).ok()?;
    let content = PersonalizedContent {
        headline: parsed.headline?.trim().to_string(),
        subheading: parsed.subheading?.trim().to_string(),
        cta_text: parsed.cta_text?.trim().to_string(),
        welcome_message: parsed.welcome_message?.trim().to_string(),
    };

    content.is_complete().then_some(content)
}
