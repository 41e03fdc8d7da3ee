//! Postgres 接入
//! 启动时建池并迁移 users / books 表；`/health` 通过 `ping` 探测数据库

use crate::config::DatabaseConfig;
use secrecy::ExposeSecret;
use sqlx::{migrate::MigrateError, postgres::PgPoolOptions, PgPool};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("could not connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("could not migrate book schema: {0}")]
    Migrate(#[from] MigrateError),

    #[error("database unreachable: {0}")]
    Unreachable(#[source] sqlx::Error),
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .test_before_acquire(true)
}

/// Open the pool and bring the schema up to date.
///
/// Either failure is fatal at startup; there is no degraded mode.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DbError> {
    let pool = pool_options(config)
        .connect(config.url.expose_secret())
        .await
        .map_err(DbError::Connect)?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Book store ready"
    );

    Ok(pool)
}

/// 存活探测，同时上报连接池使用情况
pub async fn ping(pool: &PgPool) -> Result<(), DbError> {
    metrics::gauge!("bookworm_db_connections").set(pool.size() as f64);
    metrics::gauge!("bookworm_db_idle_connections").set(pool.num_idle() as f64);

    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(DbError::Unreachable)
}
