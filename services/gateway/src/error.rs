use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use types::errors::{ClobError, ErrorKind};

/// Central error type for the Gateway application
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] ClobError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    /// Status and stable error code for the response body
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Core(err) => match err.kind() {
                ErrorKind::InvalidParameter => (StatusCode::BAD_REQUEST, "INVALID_PARAMETER"),
                ErrorKind::InvalidOrder => (StatusCode::BAD_REQUEST, "INVALID_ORDER"),
                ErrorKind::InvalidSide => (StatusCode::BAD_REQUEST, "INVALID_SIDE"),
                ErrorKind::InvalidInstrument => (StatusCode::BAD_REQUEST, "INVALID_INSTRUMENT"),
                ErrorKind::Insufficient => (StatusCode::UNPROCESSABLE_ENTITY, "INSUFFICIENT_FUNDS"),
                ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                ErrorKind::AlreadyExists => (StatusCode::CONFLICT, "ALREADY_EXISTS"),
                ErrorKind::Storage => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            },
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let error_message = match &self {
            AppError::Core(err) => err.to_string(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::InternalError(_) => "Internal server error".to_string(),
        };

        if status.is_server_error() {
            tracing::warn!(error = %self, code, "Request failed");
        }

        let body = Json(json!({
            "error": code,
            "message": error_message
        }));

        (status, body).into_response()
    }
}
