use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entity::{Patient, PatientDetail, PatientFields, VaccineSummary};
use crate::domain::repository::{PatientRepository, VaccineRepository};
use crate::error::{EntityKind, RecordError};

pub struct ManagePatientsUseCase {
    patient_repo: Arc<dyn PatientRepository>,
    vaccine_repo: Arc<dyn VaccineRepository>,
}

impl ManagePatientsUseCase {
    pub fn new(
        patient_repo: Arc<dyn PatientRepository>,
        vaccine_repo: Arc<dyn VaccineRepository>,
    ) -> Self {
        Self {
            patient_repo,
            vaccine_repo,
        }
    }

    pub async fn create_patient(&self, fields: &PatientFields) -> Result<Patient, RecordError> {
        let patient = self.patient_repo.create(fields).await?;
        tracing::info!(patient_id = patient.id, "patient created");
        Ok(patient)
    }

    pub async fn list_patients(&self) -> Result<Vec<PatientDetail>, RecordError> {
        let patients = self.patient_repo.find_all().await?;
        if patients.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = patients.iter().map(|p| p.id).collect();
        let mut vaccines_by_patient =
            group_by_patient(self.vaccine_repo.find_summaries_by_patients(&ids).await?);

        Ok(patients
            .into_iter()
            .map(|patient| {
                let vaccines = vaccines_by_patient.remove(&patient.id).unwrap_or_default();
                PatientDetail::new(patient, vaccines)
            })
            .collect())
    }

    pub async fn get_patient(&self, id: i64) -> Result<PatientDetail, RecordError> {
        let patient = self
            .patient_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| RecordError::not_found(EntityKind::Patient, id))?;
        let vaccines = self.vaccine_repo.find_summaries_by_patients(&[id]).await?;
        Ok(PatientDetail::new(patient, vaccines))
    }

    pub async fn update_patient(
        &self,
        id: i64,
        fields: &PatientFields,
    ) -> Result<Patient, RecordError> {
        let patient = self
            .patient_repo
            .update(id, fields)
            .await?
            .ok_or_else(|| RecordError::not_found(EntityKind::Patient, id))?;
        tracing::info!(patient_id = id, "patient updated");
        Ok(patient)
    }

    /// 配下のワクチン・接種の削除はストレージの連鎖削除に任せる。
    pub async fn delete_patient(&self, id: i64) -> Result<(), RecordError> {
        if !self.patient_repo.delete(id).await? {
            return Err(RecordError::not_found(EntityKind::Patient, id));
        }
        tracing::info!(patient_id = id, "patient deleted with its vaccines and doses");
        Ok(())
    }
}

fn group_by_patient(summaries: Vec<VaccineSummary>) -> HashMap<i64, Vec<VaccineSummary>> {
    let mut grouped: HashMap<i64, Vec<VaccineSummary>> = HashMap::new();
    for summary in summaries {
        grouped.entry(summary.patient_id).or_default().push(summary);
    }
    grouped
}
