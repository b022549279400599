use crate::domain::entity::{DoseDate, DoseSummary};

/// 患者に投与されたワクチン。`patient_id` は作成時に一度だけ設定される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vaccine {
    pub id: i64,
    pub patient_id: i64,
    pub vaccine_name: String,
    pub dose_date: DoseDate,
    pub dose_number: i32,
    pub vaccine_type: String,
}

impl Vaccine {
    pub fn summary(&self) -> VaccineSummary {
        VaccineSummary {
            id: self.id,
            patient_id: self.patient_id,
            vaccine_name: self.vaccine_name.clone(),
        }
    }
}

/// 作成・更新で書き込まれる記述項目。親リンクは含まない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaccineFields {
    pub vaccine_name: String,
    pub dose_date: DoseDate,
    pub dose_number: i32,
    pub vaccine_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaccineSummary {
    pub id: i64,
    pub patient_id: i64,
    pub vaccine_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaccineDetail {
    pub vaccine: Vaccine,
    pub doses: Vec<DoseSummary>,
}

impl VaccineDetail {
    pub fn new(vaccine: Vaccine, doses: Vec<DoseSummary>) -> Self {
        Self { vaccine, doses }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vaccine_summary() {
        let vaccine = Vaccine {
            id: 7,
            patient_id: 2,
            vaccine_name: "Influenza".to_string(),
            dose_date: "2023-10-01T09:00:00".parse().unwrap(),
            dose_number: 1,
            vaccine_type: "inactivated".to_string(),
        };
        let summary = vaccine.summary();
        assert_eq!(summary.id, 7);
        assert_eq!(summary.patient_id, 2);
        assert_eq!(summary.vaccine_name, "Influenza");
    }
}
