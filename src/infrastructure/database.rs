use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// 同梱スキーマ（patient / vaccine / dose）のマイグレーター。
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// PostgreSQL への接続プールを作成する。
pub async fn connect(
    database_url: &str,
    max_connections: u32,
    acquire_timeout_secs: u64,
) -> anyhow::Result<PgPool> {
    info!(max_connections, acquire_timeout_secs, "connecting to PostgreSQL...");
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
        .connect(database_url)
        .await?;
    info!("connected to PostgreSQL");
    Ok(pool)
}

/// 起動時にテーブルを作成する。適用済みのマイグレーションはスキップされる。
pub async fn apply_schema(pool: &PgPool) -> anyhow::Result<()> {
    MIGRATOR.run(pool).await?;
    info!("database schema is up to date");
    Ok(())
}
