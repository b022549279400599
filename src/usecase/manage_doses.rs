use std::sync::Arc;

use crate::domain::entity::{Dose, DoseDate, DoseFields};
use crate::domain::repository::DoseRepository;
use crate::error::{EntityKind, RecordError};

pub struct CreateDoseInput {
    pub vaccine_id: i64,
    pub type_dose: String,
    pub dose_date: String,
    pub dose_number: i32,
    pub application_type: String,
}

pub struct UpdateDoseInput {
    pub type_dose: String,
    pub dose_date: String,
    pub dose_number: i32,
    pub application_type: String,
}

fn dose_fields(
    type_dose: String,
    dose_date: &str,
    dose_number: i32,
    application_type: String,
) -> Result<DoseFields, RecordError> {
    Ok(DoseFields {
        type_dose,
        dose_date: dose_date.parse::<DoseDate>()?,
        dose_number,
        application_type,
    })
}

/// 接種は階層の末端のため、削除時の連鎖はない。
pub struct ManageDosesUseCase {
    dose_repo: Arc<dyn DoseRepository>,
}

impl ManageDosesUseCase {
    pub fn new(dose_repo: Arc<dyn DoseRepository>) -> Self {
        Self { dose_repo }
    }

    pub async fn create_dose(&self, input: CreateDoseInput) -> Result<Dose, RecordError> {
        let fields = dose_fields(
            input.type_dose,
            &input.dose_date,
            input.dose_number,
            input.application_type,
        )?;

        let dose = self
            .dose_repo
            .create(input.vaccine_id, &fields)
            .await
            .map_err(|e| {
                tracing::warn!(vaccine_id = input.vaccine_id, error = %e, "failed to create dose");
                RecordError::from(e)
            })?;
        tracing::info!(dose_id = dose.id, vaccine_id = dose.vaccine_id, "dose created");
        Ok(dose)
    }

    pub async fn list_doses(&self) -> Result<Vec<Dose>, RecordError> {
        Ok(self.dose_repo.find_all().await?)
    }

    pub async fn get_dose(&self, id: i64) -> Result<Dose, RecordError> {
        self.dose_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| RecordError::not_found(EntityKind::Dose, id))
    }

    pub async fn update_dose(&self, id: i64, input: UpdateDoseInput) -> Result<Dose, RecordError> {
        let fields = match dose_fields(
            input.type_dose,
            &input.dose_date,
            input.dose_number,
            input.application_type,
        ) {
            Ok(fields) => fields,
            Err(err) => {
                if self.dose_repo.find_by_id(id).await?.is_none() {
                    return Err(RecordError::not_found(EntityKind::Dose, id));
                }
                return Err(err);
            }
        };

        let dose = self
            .dose_repo
            .update(id, &fields)
            .await?
            .ok_or_else(|| RecordError::not_found(EntityKind::Dose, id))?;
        tracing::info!(dose_id = id, "dose updated");
        Ok(dose)
    }

    pub async fn delete_dose(&self, id: i64) -> Result<(), RecordError> {
        if !self.dose_repo.delete(id).await? {
            return Err(RecordError::not_found(EntityKind::Dose, id));
        }
        tracing::info!(dose_id = id, "dose deleted");
        Ok(())
    }
}
