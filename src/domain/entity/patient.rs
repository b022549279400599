use crate::domain::entity::VaccineSummary;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub last_name: String,
}

/// 作成・更新で書き込まれる項目。id はストレージが採番する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientFields {
    pub name: String,
    pub last_name: String,
}

impl PatientFields {
    pub fn new(name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last_name: last_name.into(),
        }
    }
}

/// 患者と、その患者に紐づくワクチンの射影。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientDetail {
    pub patient: Patient,
    pub vaccines: Vec<VaccineSummary>,
}

impl PatientDetail {
    pub fn new(patient: Patient, vaccines: Vec<VaccineSummary>) -> Self {
        Self { patient, vaccines }
    }
}
