use async_trait::async_trait;

use crate::domain::entity::{Vaccine, VaccineFields, VaccineSummary};
use crate::domain::repository::StorageResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VaccineRepository: Send + Sync {
    /// 参照先の患者が存在しない場合は `StorageError::ForeignKeyViolation`。
    async fn create(&self, patient_id: i64, fields: &VaccineFields) -> StorageResult<Vaccine>;
    async fn find_all(&self) -> StorageResult<Vec<Vaccine>>;
    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Vaccine>>;
    async fn update(&self, id: i64, fields: &VaccineFields) -> StorageResult<Option<Vaccine>>;
    async fn delete(&self, id: i64) -> StorageResult<bool>;
    /// 指定した患者群に属するワクチンの射影を id 昇順で返す。
    async fn find_summaries_by_patients(
        &self,
        patient_ids: &[i64],
    ) -> StorageResult<Vec<VaccineSummary>>;
}
