use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::error::{parse_id, ApiJson};
use super::{AppState, DeleteResponse, ErrorResponse};
use crate::domain::entity::{Patient, PatientDetail, PatientFields, VaccineSummary};
use crate::error::{EntityKind, RecordError};

// --- Request / Response DTOs ---

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct PatientRequest {
    pub name: String,
    pub last_name: String,
}

impl From<PatientRequest> for PatientFields {
    fn from(req: PatientRequest) -> Self {
        PatientFields::new(req.name, req.last_name)
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PatientResponse {
    pub id: i64,
    pub name: String,
    pub last_name: String,
}

impl From<Patient> for PatientResponse {
    fn from(p: Patient) -> Self {
        Self {
            id: p.id,
            name: p.name,
            last_name: p.last_name,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct VaccineSummaryResponse {
    pub id: i64,
    pub vaccine_name: String,
}

impl From<VaccineSummary> for VaccineSummaryResponse {
    fn from(v: VaccineSummary) -> Self {
        Self {
            id: v.id,
            vaccine_name: v.vaccine_name,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PatientDetailResponse {
    pub id: i64,
    pub name: String,
    pub last_name: String,
    pub vaccines: Vec<VaccineSummaryResponse>,
}

impl From<PatientDetail> for PatientDetailResponse {
    fn from(detail: PatientDetail) -> Self {
        Self {
            id: detail.patient.id,
            name: detail.patient.name,
            last_name: detail.patient.last_name,
            vaccines: detail.vaccines.into_iter().map(Into::into).collect(),
        }
    }
}

// --- Handlers ---

#[utoipa::path(
    post,
    path = "/api/patients",
    request_body = PatientRequest,
    responses(
        (status = 200, description = "Patient created", body = PatientResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
    )
)]
pub async fn create_patient(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<PatientRequest>,
) -> Result<Json<PatientResponse>, RecordError> {
    let patient = state
        .manage_patients_uc
        .create_patient(&PatientFields::from(req))
        .await?;
    Ok(Json(patient.into()))
}

#[utoipa::path(
    get,
    path = "/api/patients",
    responses(
        (status = 200, description = "Patient list", body = [PatientDetailResponse]),
    )
)]
pub async fn list_patients(
    State(state): State<AppState>,
) -> Result<Json<Vec<PatientDetailResponse>>, RecordError> {
    let patients = state.manage_patients_uc.list_patients().await?;
    Ok(Json(patients.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/patients/{id}",
    params(("id" = i64, Path, description = "Patient ID")),
    responses(
        (status = 200, description = "Patient found", body = PatientDetailResponse),
        (status = 404, description = "Patient not found", body = ErrorResponse),
    )
)]
pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PatientDetailResponse>, RecordError> {
    let id = parse_id(&id)?;
    let detail = state.manage_patients_uc.get_patient(id).await?;
    Ok(Json(detail.into()))
}

#[utoipa::path(
    put,
    path = "/api/patients/{id}",
    params(("id" = i64, Path, description = "Patient ID")),
    request_body = PatientRequest,
    responses(
        (status = 200, description = "Patient updated", body = PatientResponse),
        (status = 404, description = "Patient not found", body = ErrorResponse),
    )
)]
pub async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<PatientRequest>,
) -> Result<Json<PatientResponse>, RecordError> {
    let id = parse_id(&id)?;
    let patient = state
        .manage_patients_uc
        .update_patient(id, &PatientFields::from(req))
        .await?;
    Ok(Json(patient.into()))
}

/// 患者を削除する。紐づくワクチンと接種記録も連鎖して削除される。
#[utoipa::path(
    delete,
    path = "/api/patients/{id}",
    params(("id" = i64, Path, description = "Patient ID")),
    responses(
        (status = 200, description = "Patient deleted", body = DeleteResponse),
        (status = 404, description = "Patient not found", body = ErrorResponse),
    )
)]
pub async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, RecordError> {
    let id = parse_id(&id)?;
    state.manage_patients_uc.delete_patient(id).await?;
    Ok(Json(DeleteResponse::deleted(EntityKind::Patient, id)))
}
