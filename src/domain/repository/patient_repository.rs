use async_trait::async_trait;

use crate::domain::entity::{Patient, PatientFields};
use crate::domain::repository::StorageResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientRepository: Send + Sync {
    async fn create(&self, fields: &PatientFields) -> StorageResult<Patient>;
    async fn find_all(&self) -> StorageResult<Vec<Patient>>;
    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Patient>>;
    /// 存在しない場合は `None` を返す。
    async fn update(&self, id: i64, fields: &PatientFields) -> StorageResult<Option<Patient>>;
    /// 患者を削除し、配下のワクチンと接種も連鎖削除する。削除対象がなければ `false`。
    async fn delete(&self, id: i64) -> StorageResult<bool>;
}
