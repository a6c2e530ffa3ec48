use crate::application::ports::storage_port::StoragePort;
use crate::domain::links::content::{LinkContentError, content_key};

pub struct GetLinkContent<'a, S: StoragePort + ?Sized> {
    pub storage: &'a S,
}

impl<'a, S: StoragePort + ?Sized> GetLinkContent<'a, S> {
    pub async fn execute(&self, link_id: i64) -> Result<String, LinkContentError> {
        let key = content_key(link_id);
        let exists = self
            .storage
            .has(&key)
            .await
            .map_err(LinkContentError::Storage)?;
        if !exists {
            tracing::debug!(link_id, key = %key, "link_content_missing");
            return Err(LinkContentError::NotFound);
        }
        self.storage
            .read(&key)
            .await
            .map_err(LinkContentError::Storage)
    }
}
