//! Local key/value persistence.
//!
//! Mirrors browser local storage: string keys, string values, last writer
//! wins per key. Typed access goes through [`PreferenceStore`].
//!
//! # Module Structure
//!
//! - `keys`: the fixed storage keys
//! - `memory`: in-process store for tests and ephemeral sessions
//! - `preference_store`: typed load/save of every persisted record

mod memory;
mod preference_store;

pub use memory::MemoryKeyValueStore;
pub use preference_store::{PreferenceStore, StoredUserData};

use crate::error::Result;

/// Fixed, unversioned storage keys.
pub mod keys {
    pub const USER: &str = "naible_user";
    pub const USER_PREFERENCES: &str = "naible_user_preferences";
    pub const PERSONALIZED_CONTENT: &str = "naible_personalized_content";
    pub const PRIVACY_CONSENT: &str = "naible_privacy_consent";
    pub const A11Y_HIGH_CONTRAST: &str = "naible_a11y_high_contrast";
    pub const A11Y_LARGE_TEXT: &str = "naible_a11y_large_text";
    pub const A11Y_REDUCED_MOTION: &str = "naible_a11y_reduced_motion";
    pub const A11Y_SCREEN_READER: &str = "naible_a11y_screen_reader";

    /// Keys removed by "delete all my data".
    pub const USER_DATA: [&str; 3] = [USER, USER_PREFERENCES, PERSONALIZED_CONTENT];
}

/// String key/value storage.
///
/// Implementations must be safe to share across tasks; each call is
/// independent and there is no multi-key transaction.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// All keys currently stored, sorted.
    fn keys(&self) -> Result<Vec<String>>;
}
