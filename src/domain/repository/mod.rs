pub mod dose_repository;
pub mod patient_repository;
pub mod vaccine_repository;

pub use dose_repository::DoseRepository;
pub use patient_repository::PatientRepository;
pub use vaccine_repository::VaccineRepository;

use async_trait::async_trait;

/// ストレージ層が返すエラー。外部キー違反はストレージ側の制約で検出される。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("foreign key violation: {0}")]
    ForeignKeyViolation(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// readyz から利用するストレージ疎通確認。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> StorageResult<()>;
}
