use crate::application::ports::link_repository::LinkRepository;
use crate::domain::links::link::Link;

pub struct ListLinks<'a, R: LinkRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LinkRepository + ?Sized> ListLinks<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<Vec<Link>> {
        self.repo.list_all().await
    }
}
