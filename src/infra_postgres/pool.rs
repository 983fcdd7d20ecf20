use crate::settings::Postgres;
use anyhow::Result;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

pub async fn connect_pool(settings: &Postgres) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_millis(settings.acquire_timeout_ms))
        .connect(&settings.dsn)
        .await?;

    sqlx::query("SELECT 1").execute(&pool).await?;
    Ok(pool)
}
