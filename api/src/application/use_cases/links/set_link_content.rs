use crate::application::ports::storage_port::StoragePort;
use crate::domain::links::content::{LinkContentError, content_key};

pub struct SetLinkContent<'a, S: StoragePort + ?Sized> {
    pub storage: &'a S,
}

impl<'a, S: StoragePort + ?Sized> SetLinkContent<'a, S> {
    /// Writes the content and returns what storage holds afterwards.
    pub async fn execute(&self, link_id: i64, content: &str) -> Result<String, LinkContentError> {
        let key = content_key(link_id);
        self.storage
            .put(&key, content)
            .await
            .map_err(LinkContentError::WriteFailed)?;
        tracing::info!(link_id, key = %key, bytes = content.len(), "link_content_written");
        self.storage
            .read(&key)
            .await
            .map_err(LinkContentError::Storage)
    }
}
