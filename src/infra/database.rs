use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::infra::config::DatabaseConfig;
use crate::storage::postgres::ensure_schema;

/// Connects the pool and makes sure the `songs` table exists.
pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    ensure_schema(&pool).await?;
    info!(max_connections = config.max_connections, "database ready");
    Ok(pool)
}
