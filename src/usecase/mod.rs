pub mod manage_doses;
pub mod manage_patients;
pub mod manage_vaccines;

pub use manage_doses::{CreateDoseInput, ManageDosesUseCase, UpdateDoseInput};
pub use manage_patients::ManagePatientsUseCase;
pub use manage_vaccines::{CreateVaccineInput, ManageVaccinesUseCase, UpdateVaccineInput};
