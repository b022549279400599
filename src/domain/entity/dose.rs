use crate::domain::entity::DoseDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dose {
    pub id: i64,
    pub vaccine_id: i64,
    pub type_dose: String,
    pub dose_date: DoseDate,
    pub dose_number: i32,
    pub application_type: String,
}

impl Dose {
    pub fn summary(&self) -> DoseSummary {
        DoseSummary {
            id: self.id,
            vaccine_id: self.vaccine_id,
            type_dose: self.type_dose.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoseFields {
    pub type_dose: String,
    pub dose_date: DoseDate,
    pub dose_number: i32,
    pub application_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoseSummary {
    pub id: i64,
    pub vaccine_id: i64,
    pub type_dose: String,
}
