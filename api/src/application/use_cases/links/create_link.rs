use crate::application::ports::link_repository::LinkRepository;
use crate::domain::links::link::{Link, LinkFields, normalize_item_ids};

pub struct CreateLink<'a, R: LinkRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LinkRepository + ?Sized> CreateLink<'a, R> {
    pub async fn execute(&self, fields: LinkFields, item_ids: &[i64]) -> anyhow::Result<Link> {
        let item_ids = normalize_item_ids(item_ids);
        let link = self.repo.create(&fields, &item_ids).await?;
        tracing::info!(link_id = link.id, items = item_ids.len(), "link_created");
        Ok(link)
    }
}
