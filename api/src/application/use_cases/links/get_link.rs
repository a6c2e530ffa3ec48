use crate::application::ports::link_repository::LinkRepository;
use crate::domain::links::link::Link;

pub struct GetLink<'a, R: LinkRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LinkRepository + ?Sized> GetLink<'a, R> {
    pub async fn execute(&self, id: i64) -> anyhow::Result<Option<Link>> {
        self.repo.find_by_id(id).await
    }
}
