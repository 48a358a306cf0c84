//! Single-file JSON key-value store
//!
//! Every key lives in one JSON object on disk. Each write rewrites the whole
//! document to a sibling temp file and renames it over the original, so a
//! crash mid-write leaves the previous document intact.

use crate::error::Result as StorageResult;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tilawa_core::{KeyValueStore, Result, TilawaError};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Key-value store persisted as a JSON document
///
/// Values must be UTF-8; every typed layer in this crate stores JSON text.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`, creating parent directories as needed
    ///
    /// A missing file is an empty store; it is created on the first write.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a
    /// JSON object of strings
    pub async fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let entries = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        info!(path = %path.display(), keys = entries.len(), "Opened key-value store");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn persist(&self, entries: &BTreeMap<String, String>) -> std::io::Result<()> {
        let document = serde_json::to_vec_pretty(entries)?;
        let temp = self.temp_path();
        fs::write(&temp, document).await?;
        fs::rename(&temp, &self.path).await?;
        debug!(path = %self.path.display(), keys = entries.len(), "Persisted store");
        Ok(())
    }

    /// Apply `change` and persist; the in-memory map is restored on failure
    async fn write_through<F>(&self, key: &str, change: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> Option<String>,
    {
        let mut entries = self.entries.lock().await;
        let previous = change(&mut entries);

        if let Err(e) = self.persist(&entries).await {
            match previous {
                Some(value) => entries.insert(key.to_string(), value),
                None => entries.remove(key),
            };
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self
            .entries
            .lock()
            .await
            .get(key)
            .map(|value| value.clone().into_bytes()))
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let value = String::from_utf8(value).map_err(|_| {
            TilawaError::invalid_argument(format!("value for '{key}' is not UTF-8"))
        })?;
        self.write_through(key, |entries| entries.insert(key.to_string(), value))
            .await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        if !self.entries.lock().await.contains_key(key) {
            return Ok(());
        }
        self.write_through(key, |entries| entries.remove(key)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("nested/tilawa.json"))
            .await
            .unwrap();

        assert_eq!(store.get("theme").await.unwrap(), None);
        assert!(!store.path().exists(), "nothing written until first set");
    }

    #[tokio::test]
    async fn temp_file_is_a_sibling() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("tilawa.json")).await.unwrap();

        assert_eq!(store.temp_path(), dir.path().join("tilawa.json.tmp"));

        store.set("fontSize", b"20".to_vec()).await.unwrap();
        assert!(!store.temp_path().exists());
        assert!(store.path().exists());
    }

    #[tokio::test]
    async fn rejects_non_utf8_values() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("tilawa.json")).await.unwrap();

        let err = store.set("blob", vec![0xff, 0xfe]).await.unwrap_err();
        assert!(matches!(err, TilawaError::InvalidArgument(_)));
        assert_eq!(store.get("blob").await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_document_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tilawa.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            FileStore::open(&path).await,
            Err(crate::StorageError::Serialization(_))
        ));
    }
}
