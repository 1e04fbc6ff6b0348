//! Key-value backends
//!
//! A backend stores opaque text under string keys, like browser local
//! storage. Each individual write is atomic; nothing spans keys.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::StorageError;

/// Synchronous key-value persistence facility
pub trait KeyValueBackend {
    /// Raw text stored under `key`, or `None` if the key is absent
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing whatever was there
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing an absent key succeeds.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Process-local backend, lost when dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    items: BTreeMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

/// Directory backend: one `<key>.json` file per key
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Open (creating if needed) a backend rooted at `root`
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        tracing::debug!("Opened file storage at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl KeyValueBackend for FileBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let temp_path = self.root.join(format!("{}.json.tmp", key));

        // Write to temp file first, then rename into place
        fs::write(&temp_path, value)?;
        fs::rename(&temp_path, &path)?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_basic() {
        let mut backend = MemoryBackend::new();
        assert_eq!(backend.get_item("k").unwrap(), None);

        backend.set_item("k", "[1]").unwrap();
        backend.set_item("k", "[2]").unwrap();
        assert_eq!(backend.get_item("k").unwrap().as_deref(), Some("[2]"));
        assert_eq!(backend.len(), 1);

        backend.remove_item("k").unwrap();
        backend.remove_item("k").unwrap();
        assert!(backend.is_empty());
    }

    #[test]
    fn test_file_backend_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();

        let mut backend = FileBackend::open(dir.path()).unwrap();
        backend.set_item("ai_companion_user", r#"{"name":"Sam","bio":""}"#).unwrap();
        assert!(dir.path().join("ai_companion_user.json").exists());
        assert!(!dir.path().join("ai_companion_user.json.tmp").exists());

        let reopened = FileBackend::open(dir.path()).unwrap();
        assert_eq!(
            reopened.get_item("ai_companion_user").unwrap().as_deref(),
            Some(r#"{"name":"Sam","bio":""}"#)
        );
    }

    #[test]
    fn test_file_backend_remove_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = FileBackend::open(dir.path().join("nested")).unwrap();

        assert_eq!(backend.get_item("ai_companion_memory").unwrap(), None);
        backend.remove_item("ai_companion_memory").unwrap();

        backend.set_item("ai_companion_memory", "[]").unwrap();
        backend.remove_item("ai_companion_memory").unwrap();
        assert_eq!(backend.get_item("ai_companion_memory").unwrap(), None);
    }

    #[test]
    fn test_file_backend_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = FileBackend::open(dir.path()).unwrap();

        assert!(matches!(
            backend.set_item("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(backend.get_item(""), Err(StorageError::InvalidKey(_))));
    }
}
