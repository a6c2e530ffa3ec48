use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

pub type PgPool = sqlx::PgPool;

const MAX_CONNECTIONS: u32 = 10;

pub async fn connect_pool(database_url: &str) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await
        .context("connect to links database")
}

/// Applies the embedded `links`/`items`/`link_items` migrations.
pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("run links migrations")
}

pub mod repositories;
