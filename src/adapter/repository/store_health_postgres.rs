use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::repository::{StorageResult, StoreHealth};

pub struct PostgresStoreHealth {
    pool: Arc<PgPool>,
}

impl PostgresStoreHealth {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreHealth for PostgresStoreHealth {
    async fn ping(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
