use crate::application::ports::link_repository::LinkRepository;
use crate::domain::links::link::{Link, LinkFields, normalize_item_ids};

pub struct UpdateLink<'a, R: LinkRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LinkRepository + ?Sized> UpdateLink<'a, R> {
    // Full replacement of the link columns; item_ids, when given, replace the association set
    pub async fn execute(
        &self,
        id: i64,
        fields: LinkFields,
        item_ids: Option<Vec<i64>>,
    ) -> anyhow::Result<Option<Link>> {
        let item_ids = item_ids.map(|ids| normalize_item_ids(&ids));
        self.repo.update(id, &fields, item_ids.as_deref()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::repositories::link_repository_memory::MemoryLinkRepository;

    #[tokio::test]
    async fn replaces_fields_and_keeps_items_when_absent() {
        let repo = MemoryLinkRepository::with_items(["a", "b"]);
        let created = repo
            .create(
                &LinkFields {
                    name: "old".into(),
                    url: Some("https://old.example".into()),
                    description: None,
                },
                &[1],
            )
            .await
            .unwrap();

        let uc = UpdateLink { repo: &repo };
        let updated = uc
            .execute(
                created.id,
                LinkFields {
                    name: "new".into(),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "new");
        assert_eq!(updated.url, None);
        let items = repo.list_items_for(created.id).await.unwrap().unwrap();
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn replaces_items_when_given() {
        let repo = MemoryLinkRepository::with_items(["a", "b"]);
        let created = repo
            .create(
                &LinkFields {
                    name: "x".into(),
                    ..Default::default()
                },
                &[1],
            )
            .await
            .unwrap();

        let uc = UpdateLink { repo: &repo };
        uc.execute(
            created.id,
            LinkFields {
                name: "x".into(),
                ..Default::default()
            },
            Some(vec![2]),
        )
        .await
        .unwrap();

        let items = repo.list_items_for(created.id).await.unwrap().unwrap();
        assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![2]);
    }

    #[tokio::test]
    async fn missing_link_yields_none() {
        let repo = MemoryLinkRepository::new();
        let uc = UpdateLink { repo: &repo };
        let out = uc.execute(99, LinkFields::default(), None).await.unwrap();
        assert!(out.is_none());
    }
}
