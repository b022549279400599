use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::error::{parse_id, ApiJson};
use super::{AppState, DeleteResponse, ErrorResponse};
use crate::domain::entity::Dose;
use crate::error::{EntityKind, RecordError};
use crate::usecase::{CreateDoseInput, UpdateDoseInput};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateDoseRequest {
    pub vaccine_id: i64,
    pub type_dose: String,
    pub dose_date: String,
    pub dose_number: i32,
    pub application_type: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateDoseRequest {
    pub type_dose: String,
    pub dose_date: String,
    pub dose_number: i32,
    pub application_type: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DoseResponse {
    pub id: i64,
    pub vaccine_id: i64,
    pub type_dose: String,
    pub dose_date: String,
    pub dose_number: i32,
    pub application_type: String,
}

impl From<Dose> for DoseResponse {
    fn from(d: Dose) -> Self {
        Self {
            id: d.id,
            vaccine_id: d.vaccine_id,
            type_dose: d.type_dose,
            dose_date: d.dose_date.to_string(),
            dose_number: d.dose_number,
            application_type: d.application_type,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/doses",
    request_body = CreateDoseRequest,
    responses(
        (status = 200, description = "Dose created", body = DoseResponse),
        (status = 400, description = "Malformed body or dose_date", body = ErrorResponse),
        (status = 409, description = "Vaccine does not exist", body = ErrorResponse),
    )
)]
pub async fn create_dose(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateDoseRequest>,
) -> Result<Json<DoseResponse>, RecordError> {
    let input = CreateDoseInput {
        vaccine_id: req.vaccine_id,
        type_dose: req.type_dose,
        dose_date: req.dose_date,
        dose_number: req.dose_number,
        application_type: req.application_type,
    };
    let dose = state.manage_doses_uc.create_dose(input).await?;
    Ok(Json(dose.into()))
}

#[utoipa::path(
    get,
    path = "/api/doses",
    responses((status = 200, description = "Dose list", body = [DoseResponse]))
)]
pub async fn list_doses(
    State(state): State<AppState>,
) -> Result<Json<Vec<DoseResponse>>, RecordError> {
    let doses = state.manage_doses_uc.list_doses().await?;
    Ok(Json(doses.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/doses/{id}",
    params(("id" = i64, Path, description = "Dose ID")),
    responses(
        (status = 200, description = "Dose found", body = DoseResponse),
        (status = 404, description = "Dose not found", body = ErrorResponse),
    )
)]
pub async fn get_dose(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DoseResponse>, RecordError> {
    let id = parse_id(&id)?;
    let dose = state.manage_doses_uc.get_dose(id).await?;
    Ok(Json(dose.into()))
}

#[utoipa::path(
    put,
    path = "/api/doses/{id}",
    params(("id" = i64, Path, description = "Dose ID")),
    request_body = UpdateDoseRequest,
    responses(
        (status = 200, description = "Dose updated", body = DoseResponse),
        (status = 400, description = "Malformed body or dose_date", body = ErrorResponse),
        (status = 404, description = "Dose not found", body = ErrorResponse),
    )
)]
pub async fn update_dose(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateDoseRequest>,
) -> Result<Json<DoseResponse>, RecordError> {
    let id = parse_id(&id)?;
    let input = UpdateDoseInput {
        type_dose: req.type_dose,
        dose_date: req.dose_date,
        dose_number: req.dose_number,
        application_type: req.application_type,
    };
    let dose = state.manage_doses_uc.update_dose(id, input).await?;
    Ok(Json(dose.into()))
}

#[utoipa::path(
    delete,
    path = "/api/doses/{id}",
    params(("id" = i64, Path, description = "Dose ID")),
    responses(
        (status = 200, description = "Dose deleted", body = DeleteResponse),
        (status = 404, description = "Dose not found", body = ErrorResponse),
    )
)]
pub async fn delete_dose(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, RecordError> {
    let id = parse_id(&id)?;
    state.manage_doses_uc.delete_dose(id).await?;
    Ok(Json(DeleteResponse::deleted(EntityKind::Dose, id)))
}
