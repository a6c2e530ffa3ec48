use crate::application::ports::link_repository::LinkRepository;
use crate::domain::links::link::{Item, normalize_item_ids};

pub struct AttachLinkItems<'a, R: LinkRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LinkRepository + ?Sized> AttachLinkItems<'a, R> {
    /// Attaches `item_ids` and returns the resulting item list, or `None` when
    /// the link does not exist.
    pub async fn execute(
        &self,
        link_id: i64,
        item_ids: &[i64],
    ) -> anyhow::Result<Option<Vec<Item>>> {
        let item_ids = normalize_item_ids(item_ids);
        if !self.repo.attach_items(link_id, &item_ids).await? {
            return Ok(None);
        }
        self.repo.list_items_for(link_id).await
    }
}
