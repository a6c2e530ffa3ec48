use async_trait::async_trait;

/// Key-addressed text storage. Keys are relative, `/`-separated paths such as
/// `links/7.md`; adapters reject keys that escape their root.
#[async_trait]
pub trait StoragePort: Send + Sync {
    async fn has(&self, key: &str) -> anyhow::Result<bool>;
    async fn read(&self, key: &str) -> anyhow::Result<String>;
    async fn put(&self, key: &str, content: &str) -> anyhow::Result<()>;
    // Returns false when nothing was stored under the key
    async fn delete(&self, key: &str) -> anyhow::Result<bool>;
}
