//! File-backed key/value store.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use naible_core::Result;
use naible_core::storage::KeyValueStore;

use super::atomic_json::{AtomicJsonError, AtomicJsonFile};

type Entries = BTreeMap<String, String>;

/// [`KeyValueStore`] persisted as a single JSON object file.
///
/// Each write is a locked read-modify-write of the whole file. A file that
/// cannot be parsed is moved aside to `<name>.corrupt` on the next write and
/// reads treat it as empty.
pub struct FileKeyValueStore {
    file: AtomicJsonFile<Entries>,
}

impl FileKeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }

    fn read_entries(&self) -> std::result::Result<Entries, AtomicJsonError> {
        match self.file.load() {
            Ok(entries) => Ok(entries.unwrap_or_default()),
            Err(AtomicJsonError::Json(e)) => {
                tracing::warn!(
                    path = %self.file.path().display(),
                    error = %e,
                    "[Storage] Storage file is malformed, treating as empty"
                );
                Ok(Entries::new())
            }
            Err(e) => Err(e),
        }
    }

    fn load_for_write(file: &AtomicJsonFile<Entries>) -> std::result::Result<Entries, AtomicJsonError> {
        match file.load() {
            Ok(entries) => Ok(entries.unwrap_or_default()),
            Err(AtomicJsonError::Json(e)) => {
                let backup = file.path().with_extension("json.corrupt");
                tracing::warn!(
                    backup = %backup.display(),
                    error = %e,
                    "[Storage] Moving malformed storage file aside"
                );
                fs::rename(file.path(), &backup)?;
                Ok(Entries::new())
            }
            Err(e) => Err(e),
        }
    }

    fn modify<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Entries),
    {
        self.file.update_with(Self::load_for_write, f)?;
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        tracing::debug!(key, "[Storage] set");
        self.modify(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        tracing::debug!(key, "[Storage] remove");
        self.modify(|entries| {
            entries.remove(key);
        })
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.read_entries()?.into_keys().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_values_persist_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");

        let store = FileKeyValueStore::new(path.clone());
        store.set("naible_privacy_consent", "true").unwrap();
        store.set("naible_user", r#"{"id":"u1"}"#).unwrap();
        drop(store);

        let reopened = FileKeyValueStore::new(path);
        assert_eq!(
            reopened.get("naible_privacy_consent").unwrap().as_deref(),
            Some("true")
        );
        assert_eq!(
            reopened.keys().unwrap(),
            vec!["naible_privacy_consent", "naible_user"]
        );
    }

    #[test]
    fn test_remove() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().join("storage.json"));
        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        store.remove("never-there").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_missing_parent_directory_is_created() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/dir/storage.json");
        let store = FileKeyValueStore::new(path.clone());
        store.set("k", "v").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_corrupt_file_is_moved_aside() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        fs::write(&path, "{ this is not json").unwrap();

        let store = FileKeyValueStore::new(path.clone());
        assert_eq!(store.get("k").unwrap(), None);
        assert!(store.keys().unwrap().is_empty());

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        assert!(temp_dir.path().join("storage.json.corrupt").exists());
    }
}
