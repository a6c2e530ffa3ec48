use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::fs;

use crate::application::ports::storage_port::StoragePort;

/// Content storage on the local filesystem, rooted at `root`.
pub struct FsStoragePort {
    pub root: PathBuf,
}

impl FsStoragePort {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, key: &str) -> anyhow::Result<PathBuf> {
        let relative = crate::infrastructure::storage::normalize_key(key)?;
        Ok(self.root.join(relative))
    }
}

// Writes go through a uniquely named temp file beside the target; the last rename wins.
fn write_atomically(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("no parent directory for {}", path.display()))?;
    std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("create temp file in {}", parent.display()))?;
    tmp.write_all(data).with_context(|| format!("write temp file for {}", path.display()))?;
    tmp.persist(path).with_context(|| format!("rename into {}", path.display()))?;
    Ok(())
}

#[async_trait::async_trait]
impl StoragePort for FsStoragePort {
    async fn has(&self, key: &str) -> anyhow::Result<bool> {
        let path = self.resolve(key)?;
        match fs::metadata(&path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    async fn read(&self, key: &str) -> anyhow::Result<String> {
        let path = self.resolve(key)?;
        fs::read_to_string(&path)
            .await
            .with_context(|| format!("read {}", path.display()))
    }

    async fn put(&self, key: &str, content: &str) -> anyhow::Result<()> {
        let path = self.resolve(key)?;
        let content = content.to_owned();
        tokio::task::spawn_blocking(move || write_atomically(&path, content.as_bytes()))
            .await
            .context("content write task failed")?
    }

    async fn delete(&self, key: &str) -> anyhow::Result<bool> {
        let path = self.resolve(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err).with_context(|| format!("delete {}", path.display())),
        }
    }
}
