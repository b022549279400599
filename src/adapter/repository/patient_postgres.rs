use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::entity::{Patient, PatientFields};
use crate::domain::repository::{PatientRepository, StorageResult};

pub struct PatientPostgresRepository {
    pool: Arc<PgPool>,
}

impl PatientPostgresRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PatientRow {
    id: i64,
    name: String,
    last_name: String,
}

impl From<PatientRow> for Patient {
    fn from(r: PatientRow) -> Self {
        Patient {
            id: r.id,
            name: r.name,
            last_name: r.last_name,
        }
    }
}

#[async_trait]
impl PatientRepository for PatientPostgresRepository {
    async fn create(&self, fields: &PatientFields) -> StorageResult<Patient> {
        let row: PatientRow = sqlx::query_as(
            "INSERT INTO patient (name, last_name) VALUES ($1, $2) \
             RETURNING id, name, last_name",
        )
        .bind(&fields.name)
        .bind(&fields.last_name)
        .fetch_one(self.pool.as_ref())
        .await?;
        Ok(row.into())
    }

    async fn find_all(&self) -> StorageResult<Vec<Patient>> {
        let rows: Vec<PatientRow> =
            sqlx::query_as("SELECT id, name, last_name FROM patient ORDER BY id ASC")
                .fetch_all(self.pool.as_ref())
                .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Patient>> {
        let row: Option<PatientRow> =
            sqlx::query_as("SELECT id, name, last_name FROM patient WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;
        Ok(row.map(Into::into))
    }

    async fn update(&self, id: i64, fields: &PatientFields) -> StorageResult<Option<Patient>> {
        let row: Option<PatientRow> = sqlx::query_as(
            "UPDATE patient SET name = $2, last_name = $3 WHERE id = $1 \
             RETURNING id, name, last_name",
        )
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.last_name)
        .fetch_optional(self.pool.as_ref())
        .await?;
        Ok(row.map(Into::into))
    }

    // vaccine / dose は ON DELETE CASCADE で削除される
    async fn delete(&self, id: i64) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM patient WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patient_row_to_entity() {
        let row = PatientRow {
            id: 1,
            name: "Ana".to_string(),
            last_name: "Silva".to_string(),
        };
        let patient: Patient = row.into();
        assert_eq!(patient.id, 1);
        assert_eq!(patient.name, "Ana");
        assert_eq!(patient.last_name, "Silva");
    }
}
