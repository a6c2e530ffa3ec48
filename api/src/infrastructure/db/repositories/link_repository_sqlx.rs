use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, Row};

use crate::application::ports::link_repository::LinkRepository;
use crate::domain::links::link::{Item, Link, LinkFields, UnknownItems};
use crate::infrastructure::db::PgPool;

pub struct SqlxLinkRepository {
    pub pool: PgPool,
}

impl SqlxLinkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_link(r: &PgRow) -> Link {
    Link {
        id: r.get("id"),
        name: r.get("name"),
        url: r.get("url"),
        description: r.get("description"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

fn map_item(r: &PgRow) -> Item {
    Item {
        id: r.get("id"),
        name: r.get("name"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

// Fails with UnknownItems when any id has no row in `items`
async fn ensure_items_exist(conn: &mut PgConnection, item_ids: &[i64]) -> anyhow::Result<()> {
    if item_ids.is_empty() {
        return Ok(());
    }
    let found: Vec<i64> = sqlx::query_scalar("SELECT id FROM items WHERE id = ANY($1)")
        .bind(item_ids)
        .fetch_all(&mut *conn)
        .await?;
    let missing: Vec<i64> = item_ids
        .iter()
        .copied()
        .filter(|id| !found.contains(id))
        .collect();
    if !missing.is_empty() {
        return Err(UnknownItems { missing }.into());
    }
    Ok(())
}

async fn insert_link_items(
    conn: &mut PgConnection,
    link_id: i64,
    item_ids: &[i64],
) -> anyhow::Result<()> {
    if item_ids.is_empty() {
        return Ok(());
    }
    sqlx::query(
        r#"INSERT INTO link_items (link_id, item_id)
           SELECT $1, UNNEST($2::BIGINT[])
           ON CONFLICT (link_id, item_id) DO NOTHING"#,
    )
    .bind(link_id)
    .bind(item_ids)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

#[async_trait]
impl LinkRepository for SqlxLinkRepository {
    async fn list_all(&self) -> anyhow::Result<Vec<Link>> {
        let rows = sqlx::query(
            r#"SELECT id, name, url, description, created_at, updated_at
               FROM links ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(map_link).collect())
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Link>> {
        let row = sqlx::query(
            r#"SELECT id, name, url, description, created_at, updated_at
               FROM links WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_link))
    }

    async fn create(&self, fields: &LinkFields, item_ids: &[i64]) -> anyhow::Result<Link> {
        let mut tx = self.pool.begin().await?;
        ensure_items_exist(&mut tx, item_ids).await?;
        let row = sqlx::query(
            r#"INSERT INTO links (name, url, description)
               VALUES ($1, $2, $3)
               RETURNING id, name, url, description, created_at, updated_at"#,
        )
        .bind(&fields.name)
        .bind(&fields.url)
        .bind(&fields.description)
        .fetch_one(&mut *tx)
        .await?;
        let link = map_link(&row);
        insert_link_items(&mut tx, link.id, item_ids).await?;
        tx.commit().await?;
        Ok(link)
    }

    async fn update(
        &self,
        id: i64,
        fields: &LinkFields,
        item_ids: Option<&[i64]>,
    ) -> anyhow::Result<Option<Link>> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query(
            r#"UPDATE links SET
                    name = $1,
                    url = $2,
                    description = $3,
                    updated_at = now()
                WHERE id = $4
                RETURNING id, name, url, description, created_at, updated_at"#,
        )
        .bind(&fields.name)
        .bind(&fields.url)
        .bind(&fields.description)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        if let Some(ids) = item_ids {
            ensure_items_exist(&mut tx, ids).await?;
            sqlx::query("DELETE FROM link_items WHERE link_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            insert_link_items(&mut tx, id, ids).await?;
        }
        tx.commit().await?;
        Ok(Some(map_link(&row)))
    }

    async fn delete_by_id(&self, id: i64) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    async fn attach_items(&self, id: i64, item_ids: &[i64]) -> anyhow::Result<bool> {
        let mut tx = self.pool.begin().await?;
        let exists = sqlx::query("SELECT 1 FROM links WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .is_some();
        if !exists {
            return Ok(false);
        }
        ensure_items_exist(&mut tx, item_ids).await?;
        insert_link_items(&mut tx, id, item_ids).await?;
        tx.commit().await?;
        Ok(true)
    }

    async fn list_items_for(&self, id: i64) -> anyhow::Result<Option<Vec<Item>>> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(1) FROM links WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        if n == 0 {
            return Ok(None);
        }
        let rows = sqlx::query(
            r#"SELECT i.id, i.name, i.created_at, i.updated_at
               FROM link_items li
               JOIN items i ON i.id = li.item_id
               WHERE li.link_id = $1
               ORDER BY i.id"#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        Ok(Some(rows.iter().map(map_item).collect()))
    }

    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
