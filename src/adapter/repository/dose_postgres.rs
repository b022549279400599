use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::PgPool;

use crate::domain::entity::{Dose, DoseDate, DoseFields, DoseSummary};
use crate::domain::repository::{DoseRepository, StorageResult};

pub struct DosePostgresRepository {
    pool: Arc<PgPool>,
}

impl DosePostgresRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct DoseRow {
    id: i64,
    vaccine_id: i64,
    type_dose: String,
    dose_date: NaiveDateTime,
    dose_number: i32,
    application_type: String,
}

impl From<DoseRow> for Dose {
    fn from(r: DoseRow) -> Self {
        Dose {
            id: r.id,
            vaccine_id: r.vaccine_id,
            type_dose: r.type_dose,
            dose_date: DoseDate::new(r.dose_date),
            dose_number: r.dose_number,
            application_type: r.application_type,
        }
    }
}

#[derive(sqlx::FromRow)]
struct DoseSummaryRow {
    id: i64,
    vaccine_id: i64,
    type_dose: String,
}

impl From<DoseSummaryRow> for DoseSummary {
    fn from(r: DoseSummaryRow) -> Self {
        DoseSummary {
            id: r.id,
            vaccine_id: r.vaccine_id,
            type_dose: r.type_dose,
        }
    }
}

const DOSE_COLUMNS: &str = "id, vaccine_id, type_dose, dose_date, dose_number, application_type";

#[async_trait]
impl DoseRepository for DosePostgresRepository {
    async fn create(&self, vaccine_id: i64, fields: &DoseFields) -> StorageResult<Dose> {
        let sql = format!(
            "INSERT INTO dose (vaccine_id, type_dose, dose_date, dose_number, application_type) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {DOSE_COLUMNS}"
        );
        let row: DoseRow = sqlx::query_as(&sql)
            .bind(vaccine_id)
            .bind(&fields.type_dose)
            .bind(fields.dose_date.as_naive())
            .bind(fields.dose_number)
            .bind(&fields.application_type)
            .fetch_one(self.pool.as_ref())
            .await?;
        Ok(row.into())
    }

    async fn find_all(&self) -> StorageResult<Vec<Dose>> {
        let sql = format!("SELECT {DOSE_COLUMNS} FROM dose ORDER BY id ASC");
        let rows: Vec<DoseRow> = sqlx::query_as(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Dose>> {
        let sql = format!("SELECT {DOSE_COLUMNS} FROM dose WHERE id = $1");
        let row: Option<DoseRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;
        Ok(row.map(Into::into))
    }

    async fn update(&self, id: i64, fields: &DoseFields) -> StorageResult<Option<Dose>> {
        let sql = format!(
            "UPDATE dose \
             SET type_dose = $2, dose_date = $3, dose_number = $4, application_type = $5 \
             WHERE id = $1 RETURNING {DOSE_COLUMNS}"
        );
        let row: Option<DoseRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(&fields.type_dose)
            .bind(fields.dose_date.as_naive())
            .bind(fields.dose_number)
            .bind(&fields.application_type)
            .fetch_optional(self.pool.as_ref())
            .await?;
        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: i64) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM dose WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_summaries_by_vaccines(
        &self,
        vaccine_ids: &[i64],
    ) -> StorageResult<Vec<DoseSummary>> {
        if vaccine_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<DoseSummaryRow> = sqlx::query_as(
            "SELECT id, vaccine_id, type_dose FROM dose \
             WHERE vaccine_id = ANY($1) ORDER BY id ASC",
        )
        .bind(vaccine_ids)
        .fetch_all(self.pool.as_ref())
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_dose_row_to_entity() {
        let dose_date = NaiveDate::from_ymd_opt(2021, 6, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let row = DoseRow {
            id: 1,
            vaccine_id: 3,
            type_dose: "first".to_string(),
            dose_date,
            dose_number: 1,
            application_type: "intramuscular".to_string(),
        };
        let dose: Dose = row.into();
        assert_eq!(dose.vaccine_id, 3);
        assert_eq!(dose.dose_date.to_string(), "2021-06-01 09:30:00");
    }
}
