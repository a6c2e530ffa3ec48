use crate::application::ports::link_repository::LinkRepository;
use crate::domain::links::link::Item;

pub struct GetLinkItems<'a, R: LinkRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LinkRepository + ?Sized> GetLinkItems<'a, R> {
    pub async fn execute(&self, link_id: i64) -> anyhow::Result<Option<Vec<Item>>> {
        self.repo.list_items_for(link_id).await
    }
}
