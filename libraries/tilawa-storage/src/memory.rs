//! In-process key-value store

use async_trait::async_trait;
use std::collections::HashMap;
use tilawa_core::{KeyValueStore, Result};
use tokio::sync::RwLock;

/// Key-value store backed by a map; contents are lost on drop
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_delete() {
        let store = MemoryStore::new();
        assert_eq!(store.get("theme").await.unwrap(), None);

        store.set("theme", b"\"dark\"".to_vec()).await.unwrap();
        assert_eq!(store.get("theme").await.unwrap(), Some(b"\"dark\"".to_vec()));
        assert_eq!(store.len().await, 1);

        store.delete("theme").await.unwrap();
        store.delete("theme").await.unwrap();
        assert!(store.is_empty().await);
    }
}
