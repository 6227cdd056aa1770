//! Key/value storage backends

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::debug;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("Storage quota exceeded writing {key} ({needed} bytes, {available} available)")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },

    #[error("Storage lock poisoned")]
    Poisoned,

    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// String records under string keys
pub trait KeyValueStore {
    /// Read a record; `Ok(None)` when nothing is stored
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace a record as a whole
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a record; deleting a missing key is not an error
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

fn check_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// In-memory store with an optional byte quota
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit total stored bytes (keys + values)
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(quota),
        }
    }

    fn used_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        check_key(key)?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        check_key(key)?;
        if let Some(quota) = self.quota {
            let needed = key.len() + value.len();
            let available = quota.saturating_sub(self.used_without(key));
            if needed > available {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    available,
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        check_key(key)?;
        self.entries.remove(key);
        Ok(())
    }
}

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at `dir`; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        check_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source: std::io::Error| StoreError::Io { path, source }
        };

        std::fs::create_dir_all(&self.dir).map_err(io_err(&self.dir))?;

        // Write beside the target then rename, so readers see old or new
        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        std::fs::write(&tmp, value).map_err(io_err(&tmp))?;
        std::fs::rename(&tmp, &path).map_err(io_err(&path))?;

        debug!(key, path = %path.display(), bytes = value.len(), "Wrote record");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

/// A store shared between the caller and background writers
pub type SharedStore<S> = Arc<Mutex<S>>;

impl<S: KeyValueStore> KeyValueStore for Arc<Mutex<S>> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.lock().map_err(|_| StoreError::Poisoned)?.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock().map_err(|_| StoreError::Poisoned)?.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.lock().map_err(|_| StoreError::Poisoned)?.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("profile").unwrap(), None);

        store.set("profile", "{}").unwrap();
        assert_eq!(store.get("profile").unwrap().as_deref(), Some("{}"));

        store.set("profile", "{\"a\":1}").unwrap();
        assert_eq!(store.len(), 1);

        store.remove("profile").unwrap();
        store.remove("profile").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_quota() {
        let mut store = MemoryStore::with_quota(16);
        store.set("k", "0123456789").unwrap();
        // Replacing a record only counts the new size
        store.set("k", "0123456789abcd").unwrap();

        let err = store.set("other", "0123").unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { .. }));
        assert_eq!(store.get("other").unwrap(), None);
    }

    #[test]
    fn test_invalid_keys() {
        let mut store = MemoryStore::new();
        for key in ["", "../escape", ".hidden", "a/b", "spaces here"] {
            assert!(
                matches!(store.set(key, "x"), Err(StoreError::InvalidKey(_))),
                "key {:?}",
                key
            );
        }
        assert!(store.set("user_account_v1", "x").is_ok());
    }

    #[test]
    fn test_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));

        assert_eq!(store.get("avatar_components_v1").unwrap(), None);

        store.set("avatar_components_v1", "{\"skin\":3}").unwrap();
        assert_eq!(
            store.get("avatar_components_v1").unwrap().as_deref(),
            Some("{\"skin\":3}")
        );
        assert!(dir.path().join("nested/avatar_components_v1.json").exists());
        assert!(!dir.path().join("nested/.avatar_components_v1.json.tmp").exists());

        store.remove("avatar_components_v1").unwrap();
        assert_eq!(store.get("avatar_components_v1").unwrap(), None);
    }

    #[test]
    fn test_shared_store() {
        let shared: SharedStore<MemoryStore> = Arc::new(Mutex::new(MemoryStore::new()));
        let mut writer = shared.clone();

        writer.set("k", "v").unwrap();
        assert_eq!(shared.get("k").unwrap().as_deref(), Some("v"));
    }
}
