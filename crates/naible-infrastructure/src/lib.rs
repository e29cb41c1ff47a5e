pub mod paths;
pub mod storage;

pub use crate::paths::NaiblePaths;
pub use crate::storage::{ConfigStorage, FileKeyValueStore, SecretStorage};
