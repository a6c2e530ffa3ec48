use crate::application::ports::storage_port::StoragePort;
use crate::domain::links::content::{LinkContentError, content_key};

pub struct DeleteLinkContent<'a, S: StoragePort + ?Sized> {
    pub storage: &'a S,
}

impl<'a, S: StoragePort + ?Sized> DeleteLinkContent<'a, S> {
    pub async fn execute(&self, link_id: i64) -> Result<bool, LinkContentError> {
        let key = content_key(link_id);
        let exists = self
            .storage
            .has(&key)
            .await
            .map_err(LinkContentError::Storage)?;
        if !exists {
            return Err(LinkContentError::NotFound);
        }
        let removed = self
            .storage
            .delete(&key)
            .await
            .map_err(LinkContentError::Storage)?;
        tracing::info!(link_id, key = %key, removed, "link_content_deleted");
        Ok(removed)
    }
}
