//! インメモリストア。データベース未設定時とテストで利用する。
//!
//! 3 テーブルを 1 つの RwLock で保持し、外部キーの検証と連鎖削除を自前で行う。
//! 患者の削除は書き込みロックを保持したまま 接種 -> ワクチン -> 患者 の順に消すため、
//! 他のリクエストから途中状態は観測されない。

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entity::{
    Dose, DoseFields, DoseSummary, Patient, PatientFields, Vaccine, VaccineFields, VaccineSummary,
};
use crate::domain::repository::{
    DoseRepository, PatientRepository, StorageError, StorageResult, StoreHealth,
    VaccineRepository,
};

#[derive(Default)]
struct Tables {
    patients: BTreeMap<i64, Patient>,
    vaccines: BTreeMap<i64, Vaccine>,
    doses: BTreeMap<i64, Dose>,
    patient_seq: i64,
    vaccine_seq: i64,
    dose_seq: i64,
}

// 採番済みの id は削除後も再利用しない
fn next_id(seq: &mut i64) -> i64 {
    *seq += 1;
    *seq
}

fn fk_violation(table: &str, column: &str) -> StorageError {
    StorageError::ForeignKeyViolation(format!(
        "insert or update on table \"{table}\" violates foreign key constraint \"{table}_{column}_fkey\""
    ))
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PatientRepository for InMemoryStore {
    async fn create(&self, fields: &PatientFields) -> StorageResult<Patient> {
        let mut tables = self.tables.write().await;
        let patient = Patient {
            id: next_id(&mut tables.patient_seq),
            name: fields.name.clone(),
            last_name: fields.last_name.clone(),
        };
        tables.patients.insert(patient.id, patient.clone());
        Ok(patient)
    }

    async fn find_all(&self) -> StorageResult<Vec<Patient>> {
        let tables = self.tables.read().await;
        Ok(tables.patients.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Patient>> {
        let tables = self.tables.read().await;
        Ok(tables.patients.get(&id).cloned())
    }

    async fn update(&self, id: i64, fields: &PatientFields) -> StorageResult<Option<Patient>> {
        let mut tables = self.tables.write().await;
        Ok(tables.patients.get_mut(&id).map(|patient| {
            patient.name = fields.name.clone();
            patient.last_name = fields.last_name.clone();
            patient.clone()
        }))
    }

    async fn delete(&self, id: i64) -> StorageResult<bool> {
        let mut tables = self.tables.write().await;
        if !tables.patients.contains_key(&id) {
            return Ok(false);
        }

        let vaccine_ids: Vec<i64> = tables
            .vaccines
            .values()
            .filter(|v| v.patient_id == id)
            .map(|v| v.id)
            .collect();
        tables.doses.retain(|_, d| !vaccine_ids.contains(&d.vaccine_id));
        tables.vaccines.retain(|_, v| v.patient_id != id);
        tables.patients.remove(&id);
        Ok(true)
    }
}

#[async_trait]
impl VaccineRepository for InMemoryStore {
    async fn create(&self, patient_id: i64, fields: &VaccineFields) -> StorageResult<Vaccine> {
        let mut tables = self.tables.write().await;
        if !tables.patients.contains_key(&patient_id) {
            return Err(fk_violation("vaccine", "patient_id"));
        }
        let vaccine = Vaccine {
            id: next_id(&mut tables.vaccine_seq),
            patient_id,
            vaccine_name: fields.vaccine_name.clone(),
            dose_date: fields.dose_date,
            dose_number: fields.dose_number,
            vaccine_type: fields.vaccine_type.clone(),
        };
        tables.vaccines.insert(vaccine.id, vaccine.clone());
        Ok(vaccine)
    }

    async fn find_all(&self) -> StorageResult<Vec<Vaccine>> {
        let tables = self.tables.read().await;
        Ok(tables.vaccines.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Vaccine>> {
        let tables = self.tables.read().await;
        Ok(tables.vaccines.get(&id).cloned())
    }

    async fn update(&self, id: i64, fields: &VaccineFields) -> StorageResult<Option<Vaccine>> {
        let mut tables = self.tables.write().await;
        Ok(tables.vaccines.get_mut(&id).map(|vaccine| {
            vaccine.vaccine_name = fields.vaccine_name.clone();
            vaccine.dose_date = fields.dose_date;
            vaccine.dose_number = fields.dose_number;
            vaccine.vaccine_type = fields.vaccine_type.clone();
            vaccine.clone()
        }))
    }

    async fn delete(&self, id: i64) -> StorageResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.vaccines.remove(&id).is_none() {
            return Ok(false);
        }
        tables.doses.retain(|_, d| d.vaccine_id != id);
        Ok(true)
    }

    async fn find_summaries_by_patients(
        &self,
        patient_ids: &[i64],
    ) -> StorageResult<Vec<VaccineSummary>> {
        let tables = self.tables.read().await;
        Ok(tables
            .vaccines
            .values()
            .filter(|v| patient_ids.contains(&v.patient_id))
            .map(Vaccine::summary)
            .collect())
    }
}

#[async_trait]
impl DoseRepository for InMemoryStore {
    async fn create(&self, vaccine_id: i64, fields: &DoseFields) -> StorageResult<Dose> {
        let mut tables = self.tables.write().await;
        if !tables.vaccines.contains_key(&vaccine_id) {
            return Err(fk_violation("dose", "vaccine_id"));
        }
        let dose = Dose {
            id: next_id(&mut tables.dose_seq),
            vaccine_id,
            type_dose: fields.type_dose.clone(),
            dose_date: fields.dose_date,
            dose_number: fields.dose_number,
            application_type: fields.application_type.clone(),
        };
        tables.doses.insert(dose.id, dose.clone());
        Ok(dose)
    }

    async fn find_all(&self) -> StorageResult<Vec<Dose>> {
        let tables = self.tables.read().await;
        Ok(tables.doses.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Dose>> {
        let tables = self.tables.read().await;
        Ok(tables.doses.get(&id).cloned())
    }

    async fn update(&self, id: i64, fields: &DoseFields) -> StorageResult<Option<Dose>> {
        let mut tables = self.tables.write().await;
        Ok(tables.doses.get_mut(&id).map(|dose| {
            dose.type_dose = fields.type_dose.clone();
            dose.dose_date = fields.dose_date;
            dose.dose_number = fields.dose_number;
            dose.application_type = fields.application_type.clone();
            dose.clone()
        }))
    }

    async fn delete(&self, id: i64) -> StorageResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.doses.remove(&id).is_some())
    }

    async fn find_summaries_by_vaccines(
        &self,
        vaccine_ids: &[i64],
    ) -> StorageResult<Vec<DoseSummary>> {
        let tables = self.tables.read().await;
        Ok(tables
            .doses
            .values()
            .filter(|d| vaccine_ids.contains(&d.vaccine_id))
            .map(Dose::summary)
            .collect())
    }
}

#[async_trait]
impl StoreHealth for InMemoryStore {
    async fn ping(&self) -> StorageResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vaccine_fields(name: &str) -> VaccineFields {
        VaccineFields {
            vaccine_name: name.to_string(),
            dose_date: "2021-06-01T00:00:00".parse().unwrap(),
            dose_number: 1,
            vaccine_type: "mRNA".to_string(),
        }
    }

    fn dose_fields(type_dose: &str) -> DoseFields {
        DoseFields {
            type_dose: type_dose.to_string(),
            dose_date: "2021-06-01T00:00:00".parse().unwrap(),
            dose_number: 1,
            application_type: "intramuscular".to_string(),
        }
    }

    async fn seed_patient(store: &InMemoryStore, name: &str) -> Patient {
        PatientRepository::create(store, &PatientFields::new(name, "Silva"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_ids_start_at_one_and_are_not_reused() {
        let store = InMemoryStore::new();
        let first = seed_patient(&store, "Ana").await;
        assert_eq!(first.id, 1);

        assert!(PatientRepository::delete(&store, first.id).await.unwrap());
        let second = seed_patient(&store, "Bia").await;
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_vaccine_requires_existing_patient() {
        let store = InMemoryStore::new();
        let err = VaccineRepository::create(&store, 42, &vaccine_fields("COVID-19"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::ForeignKeyViolation(_)));
        assert!(VaccineRepository::find_all(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dose_requires_existing_vaccine() {
        let store = InMemoryStore::new();
        let err = DoseRepository::create(&store, 1, &dose_fields("first"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::ForeignKeyViolation(_)));
    }

    #[tokio::test]
    async fn test_delete_patient_cascades_to_vaccines_and_doses() {
        let store = InMemoryStore::new();
        let ana = seed_patient(&store, "Ana").await;
        let bia = seed_patient(&store, "Bia").await;

        let covid = VaccineRepository::create(&store, ana.id, &vaccine_fields("COVID-19"))
            .await
            .unwrap();
        let flu = VaccineRepository::create(&store, bia.id, &vaccine_fields("Influenza"))
            .await
            .unwrap();
        let covid_dose = DoseRepository::create(&store, covid.id, &dose_fields("first"))
            .await
            .unwrap();
        let flu_dose = DoseRepository::create(&store, flu.id, &dose_fields("single"))
            .await
            .unwrap();

        assert!(PatientRepository::delete(&store, ana.id).await.unwrap());

        assert!(PatientRepository::find_by_id(&store, ana.id)
            .await
            .unwrap()
            .is_none());
        assert!(VaccineRepository::find_by_id(&store, covid.id)
            .await
            .unwrap()
            .is_none());
        assert!(DoseRepository::find_by_id(&store, covid_dose.id)
            .await
            .unwrap()
            .is_none());

        // 他の患者の記録には影響しない
        assert!(VaccineRepository::find_by_id(&store, flu.id)
            .await
            .unwrap()
            .is_some());
        assert!(DoseRepository::find_by_id(&store, flu_dose.id)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_delete_vaccine_cascades_to_doses_only() {
        let store = InMemoryStore::new();
        let ana = seed_patient(&store, "Ana").await;
        let first = VaccineRepository::create(&store, ana.id, &vaccine_fields("COVID-19"))
            .await
            .unwrap();
        let sibling = VaccineRepository::create(&store, ana.id, &vaccine_fields("Hepatitis B"))
            .await
            .unwrap();
        DoseRepository::create(&store, first.id, &dose_fields("first"))
            .await
            .unwrap();
        DoseRepository::create(&store, first.id, &dose_fields("second"))
            .await
            .unwrap();
        let sibling_dose = DoseRepository::create(&store, sibling.id, &dose_fields("first"))
            .await
            .unwrap();

        assert!(VaccineRepository::delete(&store, first.id).await.unwrap());

        let remaining = DoseRepository::find_all(&store).await.unwrap();
        assert_eq!(remaining, vec![sibling_dose]);
        assert!(PatientRepository::find_by_id(&store, ana.id)
            .await
            .unwrap()
            .is_some());
        assert_eq!(
            VaccineRepository::find_summaries_by_patients(&store, &[ana.id])
                .await
                .unwrap(),
            vec![sibling.summary()]
        );
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let store = InMemoryStore::new();
        let updated = PatientRepository::update(&store, 1, &PatientFields::new("A", "B"))
            .await
            .unwrap();
        assert!(updated.is_none());
        assert!(PatientRepository::find_all(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_vaccine_update_keeps_patient_id() {
        let store = InMemoryStore::new();
        let ana = seed_patient(&store, "Ana").await;
        let created = VaccineRepository::create(&store, ana.id, &vaccine_fields("COVID-19"))
            .await
            .unwrap();

        let mut fields = vaccine_fields("COVID-19 bivalent");
        fields.dose_number = 3;
        let updated = VaccineRepository::update(&store, created.id, &fields)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.patient_id, ana.id);
        assert_eq!(updated.vaccine_name, "COVID-19 bivalent");
        assert_eq!(updated.dose_number, 3);
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        let store = InMemoryStore::new();
        assert!(!PatientRepository::delete(&store, 1).await.unwrap());
        assert!(!VaccineRepository::delete(&store, 1).await.unwrap());
        assert!(!DoseRepository::delete(&store, 1).await.unwrap());
    }
}
