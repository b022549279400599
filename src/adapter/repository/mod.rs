pub mod dose_postgres;
pub mod in_memory;
pub mod patient_postgres;
pub mod store_health_postgres;
pub mod vaccine_postgres;

pub use dose_postgres::DosePostgresRepository;
pub use in_memory::InMemoryStore;
pub use patient_postgres::PatientPostgresRepository;
pub use store_health_postgres::PostgresStoreHealth;
pub use vaccine_postgres::VaccinePostgresRepository;

use crate::domain::repository::StorageError;

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_foreign_key_violation() {
                return StorageError::ForeignKeyViolation(db_err.message().to_string());
            }
        }
        StorageError::Unavailable(err.to_string())
    }
}
