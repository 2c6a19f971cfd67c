//! File-backed durable storage.

use crate::{CredentialStorage, StorageError, StorageResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Durable storage backed by a single JSON file.
///
/// Writes go through a temp-file-then-rename so a crash mid-write leaves the
/// previous contents intact rather than a truncated file. The mutex serializes
/// read-modify-write cycles within the process.
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    /// Create a file storage rooted at the given path.
    ///
    /// The parent directory is created if missing. The file itself is created
    /// lazily on first write.
    pub fn new(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> StorageResult<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&content).map_err(|e| StorageError::Encoding(e.to_string()))
    }

    fn write_map(&self, map: &HashMap<String, String>) -> StorageResult<()> {
        let content = serde_json::to_string_pretty(map)
            .map_err(|e| StorageError::Encoding(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl CredentialStorage for FileStorage {
    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let _guard = self.lock.lock().unwrap();
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let _guard = self.lock.lock().unwrap();
        Ok(self.read_map()?.get(key).cloned())
    }

    fn delete(&self, key: &str) -> StorageResult<bool> {
        let _guard = self.lock.lock().unwrap();
        let mut map = self.read_map()?;
        let existed = map.remove(key).is_some();
        if existed {
            self.write_map(&map)?;
        }
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_roundtrip() {
        let tmp = tempfile::TempDir::new().unwrap();
        let storage = FileStorage::new(tmp.path().join("credentials.json")).unwrap();

        storage.set("token", "abc").unwrap();
        storage.set("clientToken", "def").unwrap();

        assert_eq!(storage.get("token").unwrap(), Some("abc".to_string()));
        assert_eq!(storage.get("clientToken").unwrap(), Some("def".to_string()));
        assert_eq!(storage.get("portalToken").unwrap(), None);
    }

    #[test]
    fn test_file_storage_survives_reopen() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("credentials.json");

        {
            let storage = FileStorage::new(&path).unwrap();
            storage.set("token", "persisted").unwrap();
        }

        let reopened = FileStorage::new(&path).unwrap();
        assert_eq!(reopened.get("token").unwrap(), Some("persisted".to_string()));
    }

    #[test]
    fn test_file_storage_delete() {
        let tmp = tempfile::TempDir::new().unwrap();
        let storage = FileStorage::new(tmp.path().join("credentials.json")).unwrap();

        storage.set("token", "abc").unwrap();
        assert!(storage.delete("token").unwrap());
        assert!(!storage.delete("token").unwrap());
        assert_eq!(storage.get("token").unwrap(), None);
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let tmp = tempfile::TempDir::new().unwrap();
        let storage = FileStorage::new(tmp.path().join("credentials.json")).unwrap();
        assert_eq!(storage.get("token").unwrap(), None);
        assert!(!storage.has("token").unwrap());
    }
}
