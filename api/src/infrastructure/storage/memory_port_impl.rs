use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::storage_port::StoragePort;
use crate::infrastructure::storage::object_key;

/// Process-local content storage. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryStoragePort {
    files: RwLock<HashMap<String, String>>,
    read_only: AtomicBool,
}

impl MemoryStoragePort {
    pub fn new() -> Self {
        Self::default()
    }

    // While set, every put fails as a full or read-only disk would
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }
}

#[async_trait]
impl StoragePort for MemoryStoragePort {
    async fn has(&self, key: &str) -> anyhow::Result<bool> {
        let key = object_key(key)?;
        Ok(self.files.read().await.contains_key(&key))
    }

    async fn read(&self, key: &str) -> anyhow::Result<String> {
        let key = object_key(key)?;
        self.files
            .read()
            .await
            .get(&key)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("not_found: {}", key))
    }

    async fn put(&self, key: &str, content: &str) -> anyhow::Result<()> {
        let key = object_key(key)?;
        if self.read_only.load(Ordering::SeqCst) {
            anyhow::bail!("storage is read-only");
        }
        self.files.write().await.insert(key, content.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> anyhow::Result<bool> {
        let key = object_key(key)?;
        Ok(self.files.write().await.remove(&key).is_some())
    }
}
