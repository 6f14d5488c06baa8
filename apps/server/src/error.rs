//! Maps ledger errors to structured HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use freightledger_core::Error as LedgerError;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Snapshot decoded but failed ledger validation.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BadRequest(String),
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err {
            LedgerError::Validation(_) => ApiError::Validation(message),
            LedgerError::Decode(_) | LedgerError::InvalidStatusTransition { .. } => {
                ApiError::BadRequest(message)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        tracing::debug!(status = status.as_u16(), "Rejected request: {}", self);
        let body = serde_json::json!({
            "error": {
                "code": status.as_u16(),
                "message": self.to_string(),
            }
        });
        (status, axum::Json(body)).into_response()
    }
}
