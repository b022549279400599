pub mod dose;
pub mod dose_date;
pub mod patient;
pub mod vaccine;

pub use dose::{Dose, DoseFields, DoseSummary};
pub use dose_date::{DoseDate, DoseDateError};
pub use patient::{Patient, PatientDetail, PatientFields};
pub use vaccine::{Vaccine, VaccineDetail, VaccineFields, VaccineSummary};
