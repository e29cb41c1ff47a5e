//! Application layer for Naible.
//!
//! Use cases coordinating the domain crate's stores, theme generation and
//! content generation: the onboarding conversation, personalization,
//! user identity, privacy, suggestions and the chat assistant.

pub mod chat_assistant;
pub mod conversation;
pub mod personalization;
pub mod privacy;
pub mod suggestions;
pub mod users;

pub use chat_assistant::ChatAssistant;
pub use conversation::{ControllerOptions, ConversationController, ConversationSnapshot};
pub use personalization::PersonalizationService;
pub use privacy::{DataExport, ExportFormat, PrivacyService};
pub use suggestions::{Suggestion, SuggestionEngine};
pub use users::UserService;
