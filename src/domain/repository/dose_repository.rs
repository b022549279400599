use async_trait::async_trait;

use crate::domain::entity::{Dose, DoseFields, DoseSummary};
use crate::domain::repository::StorageResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DoseRepository: Send + Sync {
    async fn create(&self, vaccine_id: i64, fields: &DoseFields) -> StorageResult<Dose>;
    async fn find_all(&self) -> StorageResult<Vec<Dose>>;
    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Dose>>;
    async fn update(&self, id: i64, fields: &DoseFields) -> StorageResult<Option<Dose>>;
    async fn delete(&self, id: i64) -> StorageResult<bool>;
    async fn find_summaries_by_vaccines(
        &self,
        vaccine_ids: &[i64],
    ) -> StorageResult<Vec<DoseSummary>>;
}
