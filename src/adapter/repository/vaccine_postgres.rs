use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::PgPool;

use crate::domain::entity::{DoseDate, Vaccine, VaccineFields, VaccineSummary};
use crate::domain::repository::{StorageResult, VaccineRepository};

pub struct VaccinePostgresRepository {
    pool: Arc<PgPool>,
}

impl VaccinePostgresRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct VaccineRow {
    id: i64,
    patient_id: i64,
    vaccine_name: String,
    dose_date: NaiveDateTime,
    dose_number: i32,
    vaccine_type: String,
}

impl From<VaccineRow> for Vaccine {
    fn from(r: VaccineRow) -> Self {
        Vaccine {
            id: r.id,
            patient_id: r.patient_id,
            vaccine_name: r.vaccine_name,
            dose_date: DoseDate::new(r.dose_date),
            dose_number: r.dose_number,
            vaccine_type: r.vaccine_type,
        }
    }
}

#[derive(sqlx::FromRow)]
struct VaccineSummaryRow {
    id: i64,
    patient_id: i64,
    vaccine_name: String,
}

impl From<VaccineSummaryRow> for VaccineSummary {
    fn from(r: VaccineSummaryRow) -> Self {
        VaccineSummary {
            id: r.id,
            patient_id: r.patient_id,
            vaccine_name: r.vaccine_name,
        }
    }
}

const VACCINE_COLUMNS: &str = "id, patient_id, vaccine_name, dose_date, dose_number, vaccine_type";

#[async_trait]
impl VaccineRepository for VaccinePostgresRepository {
    async fn create(&self, patient_id: i64, fields: &VaccineFields) -> StorageResult<Vaccine> {
        let sql = format!(
            "INSERT INTO vaccine (patient_id, vaccine_name, dose_date, dose_number, vaccine_type) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {VACCINE_COLUMNS}"
        );
        let row: VaccineRow = sqlx::query_as(&sql)
            .bind(patient_id)
            .bind(&fields.vaccine_name)
            .bind(fields.dose_date.as_naive())
            .bind(fields.dose_number)
            .bind(&fields.vaccine_type)
            .fetch_one(self.pool.as_ref())
            .await?;
        Ok(row.into())
    }

    async fn find_all(&self) -> StorageResult<Vec<Vaccine>> {
        let sql = format!("SELECT {VACCINE_COLUMNS} FROM vaccine ORDER BY id ASC");
        let rows: Vec<VaccineRow> = sqlx::query_as(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Vaccine>> {
        let sql = format!("SELECT {VACCINE_COLUMNS} FROM vaccine WHERE id = $1");
        let row: Option<VaccineRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;
        Ok(row.map(Into::into))
    }

    // patient_id は更新対象に含めない
    async fn update(&self, id: i64, fields: &VaccineFields) -> StorageResult<Option<Vaccine>> {
        let sql = format!(
            "UPDATE vaccine \
             SET vaccine_name = $2, dose_date = $3, dose_number = $4, vaccine_type = $5 \
             WHERE id = $1 RETURNING {VACCINE_COLUMNS}"
        );
        let row: Option<VaccineRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(&fields.vaccine_name)
            .bind(fields.dose_date.as_naive())
            .bind(fields.dose_number)
            .bind(&fields.vaccine_type)
            .fetch_optional(self.pool.as_ref())
            .await?;
        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: i64) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM vaccine WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_summaries_by_patients(
        &self,
        patient_ids: &[i64],
    ) -> StorageResult<Vec<VaccineSummary>> {
        if patient_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<VaccineSummaryRow> = sqlx::query_as(
            "SELECT id, patient_id, vaccine_name FROM vaccine \
             WHERE patient_id = ANY($1) ORDER BY id ASC",
        )
        .bind(patient_ids)
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
    fn test_vaccine_row_to_entity() {
        let dose_date = NaiveDate::from_ymd_opt(2021, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let row = VaccineRow {
            id: 1,
            patient_id: 1,
            vaccine_name: "COVID-19".to_string(),
            dose_date,
            dose_number: 1,
            vaccine_type: "mRNA".to_string(),
        };
        let vaccine: Vaccine = row.into();
        assert_eq!(vaccine.patient_id, 1);
        assert_eq!(vaccine.dose_date.as_naive(), dose_date);
        assert_eq!(vaccine.vaccine_type, "mRNA");
    }

    #[test]
    fn test_summary_row_to_entity() {
        let row = VaccineSummaryRow {
            id: 2,
            patient_id: 1,
            vaccine_name: "Influenza".to_string(),
        };
        let summary: VaccineSummary = row.into();
        assert_eq!(summary.id, 2);
        assert_eq!(summary.vaccine_name, "Influenza");
    }
}
