use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::RecordError;

/// ErrorBody はエラーレスポンスの本体。
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// ErrorResponse は `{ "error": ... }` 形式のエンベロープ。
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

impl IntoResponse for RecordError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            RecordError::NotFound { entity, .. } => (
                StatusCode::NOT_FOUND,
                format!("IMM_{}_NOT_FOUND", entity.as_str().to_uppercase()),
            ),
            RecordError::MalformedInput(_) => {
                (StatusCode::BAD_REQUEST, "IMM_MALFORMED_INPUT".to_string())
            }
            RecordError::ConstraintViolation(_) => {
                (StatusCode::CONFLICT, "IMM_CONSTRAINT_VIOLATION".to_string())
            }
            RecordError::StorageUnavailable(msg) => {
                tracing::error!(error = %msg, "storage unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "IMM_STORAGE_UNAVAILABLE".to_string(),
                )
            }
        };

        let message = match &self {
            RecordError::NotFound { .. } => self.to_string(),
            RecordError::MalformedInput(msg)
            | RecordError::ConstraintViolation(msg)
            | RecordError::StorageUnavailable(msg) => msg.clone(),
        };

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}

impl From<JsonRejection> for RecordError {
    fn from(rejection: JsonRejection) -> Self {
        RecordError::MalformedInput(rejection.body_text())
    }
}

/// JSON ボディの抽出失敗を共通のエラーレスポンスに変換する抽出子。
#[derive(FromRequest)]
#[from_request(via(Json), rejection(RecordError))]
pub struct ApiJson<T>(pub T);

/// パスパラメータを整数の ID として解釈する。
pub fn parse_id(raw: &str) -> Result<i64, RecordError> {
    raw.parse::<i64>()
        .map_err(|_| RecordError::MalformedInput(format!("invalid id: {raw}")))
}
