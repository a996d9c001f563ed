//! Durable key-value stores for session data.

use crate::core::constants::{SAVE_DIR_NAME, SESSION_FILE_NAME};
use crate::error::StoreError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Synchronous string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Write several keys. Stores backed by a single file override this to
    /// write once.
    fn set_all(&mut self, entries: &[(&str, String)]) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Remove every key.
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// In-memory store for tests and simulation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.values.clear();
        Ok(())
    }
}

/// Get the ~/.nftuklas/ directory path, creating it if needed.
pub fn save_dir() -> Result<PathBuf, StoreError> {
    let home_dir = dirs::home_dir().ok_or(StoreError::NoHomeDir)?;
    let dir = home_dir.join(SAVE_DIR_NAME);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// All keys in one pretty-printed JSON object on disk.
///
/// The file is read once on open and rewritten on every write.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at ~/.nftuklas/session.json.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(save_dir()?.join(SESSION_FILE_NAME))
    }

    /// Open a store file. A missing file is an empty store; an unreadable or
    /// corrupt one is logged and treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let values = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "session file is corrupt, starting empty");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "session file unreadable, starting empty");
                BTreeMap::new()
            }
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn set_all(&mut self, entries: &[(&str, String)]) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.values.insert(key.to_string(), value.clone());
        }
        self.flush()
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.values.clear();
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn temp_store_path() -> PathBuf {
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);
        let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir()
            .join(format!("nftuklas-store-test-{}-{}", std::process::id(), test_id))
            .join(SESSION_FILE_NAME)
    }

    #[test]
    fn test_memory_store_set_get_clear() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("nftuklas-coins").unwrap(), None);
        store.set("nftuklas-coins", "42").unwrap();
        assert_eq!(store.get("nftuklas-coins").unwrap().as_deref(), Some("42"));
        store.clear().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let path = temp_store_path();
        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store
                .set_all(&[
                    ("nftuklas-coins", "120".to_string()),
                    ("nftuklas-lives", "3".to_string()),
                ])
                .unwrap();
        }
        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("nftuklas-coins").unwrap().as_deref(), Some("120"));
        assert_eq!(store.get("nftuklas-lives").unwrap().as_deref(), Some("3"));

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_file_store_clear_removes_file() {
        let path = temp_store_path();
        let mut store = JsonFileStore::open(&path).unwrap();
        store.set("nftuklas-streak", "4").unwrap();
        assert!(path.exists());

        store.clear().unwrap();
        assert!(!path.exists());
        assert_eq!(store.get("nftuklas-streak").unwrap(), None);

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_corrupt_file_opens_empty() {
        let path = temp_store_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json {").unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("nftuklas-coins").unwrap(), None);

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}
