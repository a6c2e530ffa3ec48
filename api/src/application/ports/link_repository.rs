use async_trait::async_trait;

use crate::domain::links::link::{Item, Link, LinkFields};

/// Record store for Links and their Item associations.
///
/// Writes that reference Item ids fail with
/// [`UnknownItems`](crate::domain::links::link::UnknownItems) (recoverable via
/// `anyhow::Error::downcast_ref`) and leave the store untouched.
#[async_trait]
pub trait LinkRepository: Send + Sync {
    async fn list_all(&self) -> anyhow::Result<Vec<Link>>;

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Link>>;

    // Inserts the link and attaches item_ids as one unit
    async fn create(&self, fields: &LinkFields, item_ids: &[i64]) -> anyhow::Result<Link>;

    // item_ids: None => keep associations; Some(ids) => replace them with ids
    async fn update(
        &self,
        id: i64,
        fields: &LinkFields,
        item_ids: Option<&[i64]>,
    ) -> anyhow::Result<Option<Link>>;

    // Number of rows removed (0 when the id is absent)
    async fn delete_by_id(&self, id: i64) -> anyhow::Result<u64>;

    // Returns false when the link does not exist; already attached ids are ignored
    async fn attach_items(&self, id: i64, item_ids: &[i64]) -> anyhow::Result<bool>;

    // None when the link does not exist
    async fn list_items_for(&self, id: i64) -> anyhow::Result<Option<Vec<Item>>>;

    async fn ping(&self) -> anyhow::Result<()>;
}
