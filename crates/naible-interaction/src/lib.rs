//! Outbound integrations: chat completion, hero-copy generation and
//! speech-to-text.

pub mod chat_client;
pub mod content_generator;
pub mod prompts;
pub mod transcription;

pub use chat_client::{ChatCompletion, ChatError, ChatMessage, CompletionOptions, OpenAiChatClient};
pub use content_generator::{LlmContentGenerator, parse_content_reply};
pub use transcription::{ScriptedTranscriber, WhisperTranscriber};
