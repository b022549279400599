use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entity::{DoseDate, DoseSummary, Vaccine, VaccineDetail, VaccineFields};
use crate::domain::repository::{DoseRepository, VaccineRepository};
use crate::error::{EntityKind, RecordError};

pub struct CreateVaccineInput {
    pub patient_id: i64,
    pub vaccine_name: String,
    /// ISO-8601 形式の日時文字列
    pub dose_date: String,
    pub dose_number: i32,
    pub vaccine_type: String,
}

/// 更新対象は記述項目のみ。`patient_id` は変更できない。
pub struct UpdateVaccineInput {
    pub vaccine_name: String,
    pub dose_date: String,
    pub dose_number: i32,
    pub vaccine_type: String,
}

fn vaccine_fields(
    vaccine_name: String,
    dose_date: &str,
    dose_number: i32,
    vaccine_type: String,
) -> Result<VaccineFields, RecordError> {
    Ok(VaccineFields {
        vaccine_name,
        dose_date: dose_date.parse::<DoseDate>()?,
        dose_number,
        vaccine_type,
    })
}

pub struct ManageVaccinesUseCase {
    vaccine_repo: Arc<dyn VaccineRepository>,
    dose_repo: Arc<dyn DoseRepository>,
}

impl ManageVaccinesUseCase {
    pub fn new(vaccine_repo: Arc<dyn VaccineRepository>, dose_repo: Arc<dyn DoseRepository>) -> Self {
        Self {
            vaccine_repo,
            dose_repo,
        }
    }

    /// 患者の存在確認は行わない。外部キー制約違反として検出される。
    pub async fn create_vaccine(&self, input: CreateVaccineInput) -> Result<Vaccine, RecordError> {
        let fields = vaccine_fields(
            input.vaccine_name,
            &input.dose_date,
            input.dose_number,
            input.vaccine_type,
        )?;

        let vaccine = self
            .vaccine_repo
            .create(input.patient_id, &fields)
            .await
            .map_err(|e| {
                tracing::warn!(patient_id = input.patient_id, error = %e, "failed to create vaccine");
                RecordError::from(e)
            })?;
        tracing::info!(
            vaccine_id = vaccine.id,
            patient_id = vaccine.patient_id,
            "vaccine created"
        );
        Ok(vaccine)
    }

    pub async fn list_vaccines(&self) -> Result<Vec<VaccineDetail>, RecordError> {
        let vaccines = self.vaccine_repo.find_all().await?;
        if vaccines.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = vaccines.iter().map(|v| v.id).collect();
        let mut doses_by_vaccine =
            group_by_vaccine(self.dose_repo.find_summaries_by_vaccines(&ids).await?);

        Ok(vaccines
            .into_iter()
            .map(|vaccine| {
                let doses = doses_by_vaccine.remove(&vaccine.id).unwrap_or_default();
                VaccineDetail::new(vaccine, doses)
            })
            .collect())
    }

    pub async fn get_vaccine(&self, id: i64) -> Result<VaccineDetail, RecordError> {
        let vaccine = self
            .vaccine_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| RecordError::not_found(EntityKind::Vaccine, id))?;
        let doses = self.dose_repo.find_summaries_by_vaccines(&[id]).await?;
        Ok(VaccineDetail::new(vaccine, doses))
    }

    pub async fn update_vaccine(
        &self,
        id: i64,
        input: UpdateVaccineInput,
    ) -> Result<Vaccine, RecordError> {
        let fields = match vaccine_fields(
            input.vaccine_name,
            &input.dose_date,
            input.dose_number,
            input.vaccine_type,
        ) {
            Ok(fields) => fields,
            Err(err) => {
                // 対象が存在しない場合は日時の検証エラーより NotFound を優先する
                if self.vaccine_repo.find_by_id(id).await?.is_none() {
                    return Err(RecordError::not_found(EntityKind::Vaccine, id));
                }
                return Err(err);
            }
        };

        let vaccine = self
            .vaccine_repo
            .update(id, &fields)
            .await?
            .ok_or_else(|| RecordError::not_found(EntityKind::Vaccine, id))?;
        tracing::info!(vaccine_id = id, "vaccine updated");
        Ok(vaccine)
    }

    pub async fn delete_vaccine(&self, id: i64) -> Result<(), RecordError> {
        if !self.vaccine_repo.delete(id).await? {
            return Err(RecordError::not_found(EntityKind::Vaccine, id));
        }
        tracing::info!(vaccine_id = id, "vaccine deleted with its doses");
        Ok(())
    }
}

fn group_by_vaccine(summaries: Vec<DoseSummary>) -> HashMap<i64, Vec<DoseSummary>> {
    let mut grouped: HashMap<i64, Vec<DoseSummary>> = HashMap::new();
    for summary in summaries {
        grouped.entry(summary.vaccine_id).or_default().push(summary);
    }
    grouped
}
