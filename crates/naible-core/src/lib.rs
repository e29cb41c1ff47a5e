//! Domain model and pure logic for the Naible onboarding engine.
//!
//! Nothing in this crate performs network or file IO; the seams that do
//! ([`storage::KeyValueStore`], [`generation::ContentGenerator`],
//! [`generation::Transcriber`], [`theme::ThemeSink`]) are traits implemented
//! by the infrastructure and interaction crates.

pub mod accessibility;
pub mod brand;
pub mod config;
pub mod content;
pub mod conversation;
pub mod error;
pub mod generation;
pub mod preferences;
pub mod selector;
pub mod storage;
pub mod theme;
pub mod typewriter;
pub mod user;

// Re-export common types
pub use content::PersonalizedContent;
pub use conversation::{ConversationStep, StepResponse};
pub use error::{NaibleError, Result};
pub use preferences::{ThemeMode, UserPreferences};
pub use theme::{GeneratedTheme, generate_theme};
pub use user::AnonymousUser;
