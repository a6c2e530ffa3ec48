use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::application::ports::link_repository::LinkRepository;
use crate::domain::links::link::{Item, Link, LinkFields, UnknownItems};

#[derive(Default)]
struct MemoryState {
    last_link_id: i64,
    links: BTreeMap<i64, Link>,
    items: BTreeMap<i64, Item>,
    link_items: BTreeMap<i64, BTreeSet<i64>>,
}

impl MemoryState {
    fn ensure_items_exist(&self, item_ids: &[i64]) -> Result<(), UnknownItems> {
        let missing: Vec<i64> = item_ids
            .iter()
            .copied()
            .filter(|id| !self.items.contains_key(id))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(UnknownItems { missing })
        }
    }
}

/// Process-local record store. Items are fixed at construction time.
#[derive(Default)]
pub struct MemoryLinkRepository {
    state: RwLock<MemoryState>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds items with sequential ids starting at 1.
    pub fn with_items<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let now = Utc::now();
        let mut state = MemoryState::default();
        for (idx, name) in names.into_iter().enumerate() {
            let id = idx as i64 + 1;
            state.items.insert(
                id,
                Item {
                    id,
                    name: name.into(),
                    created_at: now,
                    updated_at: now,
                },
            );
        }
        Self {
            state: RwLock::new(state),
        }
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn list_all(&self) -> anyhow::Result<Vec<Link>> {
        let state = self.state.read().await;
        Ok(state.links.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Link>> {
        let state = self.state.read().await;
        Ok(state.links.get(&id).cloned())
    }

    async fn create(&self, fields: &LinkFields, item_ids: &[i64]) -> anyhow::Result<Link> {
        let mut state = self.state.write().await;
        state.ensure_items_exist(item_ids)?;
        state.last_link_id += 1;
        let now = Utc::now();
        let link = Link {
            id: state.last_link_id,
            name: fields.name.clone(),
            url: fields.url.clone(),
            description: fields.description.clone(),
            created_at: now,
            updated_at: now,
        };
        state.links.insert(link.id, link.clone());
        state
            .link_items
            .insert(link.id, item_ids.iter().copied().collect());
        Ok(link)
    }

    async fn update(
        &self,
        id: i64,
        fields: &LinkFields,
        item_ids: Option<&[i64]>,
    ) -> anyhow::Result<Option<Link>> {
        let mut state = self.state.write().await;
        if !state.links.contains_key(&id) {
            return Ok(None);
        }
        if let Some(ids) = item_ids {
            state.ensure_items_exist(ids)?;
            state.link_items.insert(id, ids.iter().copied().collect());
        }
        let Some(link) = state.links.get_mut(&id) else {
            return Ok(None);
        };
        link.name = fields.name.clone();
        link.url = fields.url.clone();
        link.description = fields.description.clone();
        link.updated_at = Utc::now();
        Ok(Some(link.clone()))
    }

    async fn delete_by_id(&self, id: i64) -> anyhow::Result<u64> {
        let mut state = self.state.write().await;
        state.link_items.remove(&id);
        Ok(state.links.remove(&id).map_or(0, |_| 1))
    }

    async fn attach_items(&self, id: i64, item_ids: &[i64]) -> anyhow::Result<bool> {
        let mut state = self.state.write().await;
        if !state.links.contains_key(&id) {
            return Ok(false);
        }
        state.ensure_items_exist(item_ids)?;
        state
            .link_items
            .entry(id)
            .or_default()
            .extend(item_ids.iter().copied());
        Ok(true)
    }

    async fn list_items_for(&self, id: i64) -> anyhow::Result<Option<Vec<Item>>> {
        let state = self.state.read().await;
        if !state.links.contains_key(&id) {
            return Ok(None);
        }
        let items = state
            .link_items
            .get(&id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|item_id| state.items.get(item_id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        Ok(Some(items))
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
