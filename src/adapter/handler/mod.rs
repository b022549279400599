pub mod dose_handler;
pub mod error;
pub mod health;
pub mod patient_handler;
pub mod vaccine_handler;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use serde::Serialize;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::domain::repository::{DoseRepository, PatientRepository, StoreHealth, VaccineRepository};
use crate::error::EntityKind;
use crate::usecase::{ManageDosesUseCase, ManagePatientsUseCase, ManageVaccinesUseCase};

pub use error::{ErrorBody, ErrorResponse};

/// AppState はアプリケーション全体の共有状態を表す。
#[derive(Clone)]
pub struct AppState {
    pub manage_patients_uc: Arc<ManagePatientsUseCase>,
    pub manage_vaccines_uc: Arc<ManageVaccinesUseCase>,
    pub manage_doses_uc: Arc<ManageDosesUseCase>,
    pub store_health: Arc<dyn StoreHealth>,
}

impl AppState {
    pub fn new(
        patient_repo: Arc<dyn PatientRepository>,
        vaccine_repo: Arc<dyn VaccineRepository>,
        dose_repo: Arc<dyn DoseRepository>,
        store_health: Arc<dyn StoreHealth>,
    ) -> Self {
        Self {
            manage_patients_uc: Arc::new(ManagePatientsUseCase::new(
                patient_repo,
                vaccine_repo.clone(),
            )),
            manage_vaccines_uc: Arc::new(ManageVaccinesUseCase::new(
                vaccine_repo,
                dose_repo.clone(),
            )),
            manage_doses_uc: Arc::new(ManageDosesUseCase::new(dose_repo)),
            store_health,
        }
    }
}

/// 削除成功時のレスポンス。
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DeleteResponse {
    pub message: String,
}

impl DeleteResponse {
    pub fn deleted(entity: EntityKind, id: i64) -> Self {
        Self {
            message: format!("{entity} with id {id} deleted successfully"),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        health::readyz,
        patient_handler::create_patient,
        patient_handler::list_patients,
        patient_handler::get_patient,
        patient_handler::update_patient,
        patient_handler::delete_patient,
        vaccine_handler::create_vaccine,
        vaccine_handler::list_vaccines,
        vaccine_handler::get_vaccine,
        vaccine_handler::update_vaccine,
        vaccine_handler::delete_vaccine,
        dose_handler::create_dose,
        dose_handler::list_doses,
        dose_handler::get_dose,
        dose_handler::update_dose,
        dose_handler::delete_dose,
    ),
    components(schemas(
        patient_handler::PatientRequest,
        patient_handler::PatientResponse,
        patient_handler::PatientDetailResponse,
        patient_handler::VaccineSummaryResponse,
        vaccine_handler::CreateVaccineRequest,
        vaccine_handler::UpdateVaccineRequest,
        vaccine_handler::VaccineResponse,
        vaccine_handler::VaccineDetailResponse,
        vaccine_handler::DoseSummaryResponse,
        dose_handler::CreateDoseRequest,
        dose_handler::UpdateDoseRequest,
        dose_handler::DoseResponse,
        DeleteResponse,
        ErrorResponse,
        ErrorBody,
    )),
)]
struct ApiDoc;

/// REST API ルーターを構築する。
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route(
            "/api/patients",
            get(patient_handler::list_patients).post(patient_handler::create_patient),
        )
        .route(
            "/api/patients/{id}",
            get(patient_handler::get_patient)
                .put(patient_handler::update_patient)
                .delete(patient_handler::delete_patient),
        )
        .route(
            "/api/vaccines",
            get(vaccine_handler::list_vaccines).post(vaccine_handler::create_vaccine),
        )
        .route(
            "/api/vaccines/{id}",
            get(vaccine_handler::get_vaccine)
                .put(vaccine_handler::update_vaccine)
                .delete(vaccine_handler::delete_vaccine),
        )
        .route(
            "/api/doses",
            get(dose_handler::list_doses).post(dose_handler::create_dose),
        )
        .route(
            "/api/doses/{id}",
            get(dose_handler::get_dose)
                .put(dose_handler::update_dose)
                .delete(dose_handler::delete_dose),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
