//! Storage layer for atomic file operations, configuration and secrets.

mod atomic_json;
mod config_storage;
mod file_store;
mod secret_storage;

pub use atomic_json::{AtomicJsonError, AtomicJsonFile};
pub use config_storage::{AZURE_DEPLOYMENT_ENV, AZURE_ENDPOINT_ENV, ConfigStorage};
pub use file_store::FileKeyValueStore;
pub use secret_storage::{AZURE_API_KEY_ENV, OPENAI_API_KEY_ENV, SecretStorage, SecretStorageError};
