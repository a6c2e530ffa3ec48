use crate::application::ports::link_repository::LinkRepository;

pub struct DeleteLink<'a, R: LinkRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LinkRepository + ?Sized> DeleteLink<'a, R> {
    // The link's content file is intentionally left in storage
    pub async fn execute(&self, id: i64) -> anyhow::Result<u64> {
        let deleted = self.repo.delete_by_id(id).await?;
        if deleted > 0 {
            tracing::info!(link_id = id, "link_deleted");
        }
        Ok(deleted)
    }
}
