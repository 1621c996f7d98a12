//! Persistent key-value stores for client-local state.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use crate::StoreError;

/// Synchronous key-value storage that survives across client restarts.
///
/// Reads never fail: a missing or unreadable value is `None`.
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &str) -> Option<String>;

    /// Set a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a value. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-process store, used for tests and ephemeral clients.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .map_err(|_| StoreError::Poisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .map_err(|_| StoreError::Poisoned)?
            .remove(key);
        Ok(())
    }
}

/// Store backed by a JSON object file.
///
/// The file is read lazily on first access. A missing or corrupted file is
/// treated as an empty store. Every write replaces the file through a
/// temporary sibling and a rename.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<Option<HashMap<String, String>>>,
}

impl FileStore {
    /// Open a store at the given path. Nothing is read until first access.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Mutex::new(None),
        }
    }

    /// Get the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> HashMap<String, String> {
        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring corrupted store file");
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        }
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn update<F>(&self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut HashMap<String, String>),
    {
        let mut guard = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        let mut next = guard
            .get_or_insert_with(|| Self::load(&self.path))
            .clone();
        f(&mut next);
        // Readers only see the change once it is on disk.
        self.persist(&next)?;
        *guard = Some(next);
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let mut guard = self.entries.lock().ok()?;
        guard
            .get_or_insert_with(|| Self::load(&self.path))
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("token"), None);

        store.set("token", "abc").unwrap();
        assert_eq!(store.get("token").as_deref(), Some("abc"));

        store.set("token", "def").unwrap();
        assert_eq!(store.get("token").as_deref(), Some("def"));

        store.remove("token").unwrap();
        assert_eq!(store.get("token"), None);
    }

    #[test]
    fn test_memory_store_remove_missing() {
        let store = MemoryStore::new();
        assert!(store.remove("nothing").is_ok());
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileStore::open(&path);
        store.set("token", "abc").unwrap();
        drop(store);

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("token").as_deref(), Some("abc"));
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("absent.json"));
        assert_eq!(store.get("token"), None);
    }

    #[test]
    fn test_file_store_corrupted_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.get("token"), None);

        // A write replaces the corrupted contents.
        store.set("token", "fresh").unwrap();
        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("token").as_deref(), Some("fresh"));
    }

    #[test]
    fn test_file_store_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileStore::open(&path);
        store.set("token", "abc").unwrap();
        store.set("user", "{}").unwrap();
        store.remove("token").unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("token"), None);
        assert_eq!(reopened.get("user").as_deref(), Some("{}"));
    }

    #[test]
    fn test_file_store_failed_set_not_visible() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("state");
        std::fs::write(&blocker, "not a directory").unwrap();

        let store = FileStore::open(blocker.join("session.json"));
        assert!(store.set("token", "abc").is_err());
        assert_eq!(store.get("token"), None);
    }

    #[test]
    fn test_file_store_failed_remove_keeps_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"token": "abc"}"#).unwrap();
        // Occupy the temporary sibling so the write cannot land.
        std::fs::create_dir(path.with_extension("tmp")).unwrap();

        let store = FileStore::open(&path);
        assert!(store.remove("token").is_err());
        assert_eq!(store.get("token").as_deref(), Some("abc"));

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("token").as_deref(), Some("abc"));
    }
}
