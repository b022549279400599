use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::error::{parse_id, ApiJson};
use super::{AppState, DeleteResponse, ErrorResponse};
use crate::domain::entity::{DoseSummary, Vaccine, VaccineDetail};
use crate::error::{EntityKind, RecordError};
use crate::usecase::{CreateVaccineInput, UpdateVaccineInput};

// --- Request / Response DTOs ---

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateVaccineRequest {
    pub patient_id: i64,
    pub vaccine_name: String,
    /// ISO-8601 (例: `2021-06-01T00:00:00`)
    pub dose_date: String,
    pub dose_number: i32,
    pub vaccine_type: String,
}

/// `patient_id` が含まれていても無視する。
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateVaccineRequest {
    pub vaccine_name: String,
    pub dose_date: String,
    pub dose_number: i32,
    pub vaccine_type: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct VaccineResponse {
    pub id: i64,
    pub patient_id: i64,
    pub vaccine_name: String,
    pub dose_date: String,
    pub dose_number: i32,
    pub vaccine_type: String,
}

impl From<Vaccine> for VaccineResponse {
    fn from(v: Vaccine) -> Self {
        Self {
            id: v.id,
            patient_id: v.patient_id,
            vaccine_name: v.vaccine_name,
            dose_date: v.dose_date.to_string(),
            dose_number: v.dose_number,
            vaccine_type: v.vaccine_type,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DoseSummaryResponse {
    pub id: i64,
    pub type_dose: String,
}

impl From<DoseSummary> for DoseSummaryResponse {
    fn from(d: DoseSummary) -> Self {
        Self {
            id: d.id,
            type_dose: d.type_dose,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct VaccineDetailResponse {
    #[serde(flatten)]
    pub vaccine: VaccineResponse,
    pub doses: Vec<DoseSummaryResponse>,
}

impl From<VaccineDetail> for VaccineDetailResponse {
    fn from(detail: VaccineDetail) -> Self {
        Self {
            vaccine: detail.vaccine.into(),
            doses: detail.doses.into_iter().map(Into::into).collect(),
        }
    }
}

// --- Handlers ---

#[utoipa::path(
    post,
    path = "/api/vaccines",
    request_body = CreateVaccineRequest,
    responses(
        (status = 200, description = "Vaccine created", body = VaccineResponse),
        (status = 400, description = "Malformed body or dose_date", body = ErrorResponse),
        (status = 409, description = "Patient does not exist", body = ErrorResponse),
    )
)]
pub async fn create_vaccine(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateVaccineRequest>,
) -> Result<Json<VaccineResponse>, RecordError> {
    let input = CreateVaccineInput {
        patient_id: req.patient_id,
        vaccine_name: req.vaccine_name,
        dose_date: req.dose_date,
        dose_number: req.dose_number,
        vaccine_type: req.vaccine_type,
    };
    let vaccine = state.manage_vaccines_uc.create_vaccine(input).await?;
    Ok(Json(vaccine.into()))
}

#[utoipa::path(
    get,
    path = "/api/vaccines",
    responses(
        (status = 200, description = "Vaccine list", body = [VaccineDetailResponse]),
    )
)]
pub async fn list_vaccines(
    State(state): State<AppState>,
) -> Result<Json<Vec<VaccineDetailResponse>>, RecordError> {
    let vaccines = state.manage_vaccines_uc.list_vaccines().await?;
    Ok(Json(vaccines.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/vaccines/{id}",
    params(("id" = i64, Path, description = "Vaccine ID")),
    responses(
        (status = 200, description = "Vaccine found", body = VaccineDetailResponse),
        (status = 404, description = "Vaccine not found", body = ErrorResponse),
    )
)]
pub async fn get_vaccine(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VaccineDetailResponse>, RecordError> {
    let id = parse_id(&id)?;
    let detail = state.manage_vaccines_uc.get_vaccine(id).await?;
    Ok(Json(detail.into()))
}

#[utoipa::path(
    put,
    path = "/api/vaccines/{id}",
    params(("id" = i64, Path, description = "Vaccine ID")),
    request_body = UpdateVaccineRequest,
    responses(
        (status = 200, description = "Vaccine updated", body = VaccineResponse),
        (status = 400, description = "Malformed body or dose_date", body = ErrorResponse),
        (status = 404, description = "Vaccine not found", body = ErrorResponse),
    )
)]
pub async fn update_vaccine(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateVaccineRequest>,
) -> Result<Json<VaccineResponse>, RecordError> {
    let id = parse_id(&id)?;
    let input = UpdateVaccineInput {
        vaccine_name: req.vaccine_name,
        dose_date: req.dose_date,
        dose_number: req.dose_number,
        vaccine_type: req.vaccine_type,
    };
    let vaccine = state.manage_vaccines_uc.update_vaccine(id, input).await?;
    Ok(Json(vaccine.into()))
}

#[utoipa::path(
    delete,
    path = "/api/vaccines/{id}",
    params(("id" = i64, Path, description = "Vaccine ID")),
    responses(
        (status = 200, description = "Vaccine deleted", body = DeleteResponse),
        (status = 404, description = "Vaccine not found", body = ErrorResponse),
    )
)]
pub async fn delete_vaccine(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, RecordError> {
    let id = parse_id(&id)?;
    state.manage_vaccines_uc.delete_vaccine(id).await?;
    Ok(Json(DeleteResponse::deleted(EntityKind::Vaccine, id)))
}
