use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use quorum_core::Error as CoreError;

/// API-boundary error: every variant renders as a JSON `{message}`
/// envelope with its status code, defaulting to 500.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl AppError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }
}

impl From<CoreError> for AppError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Unauthorized(message) => Self::Unauthorized(message),
            CoreError::Forbidden(message) => Self::Forbidden(message),
            CoreError::NotFound(message) => Self::NotFound(message),
            CoreError::InvalidInput(message) => Self::BadRequest(message),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_onto_status_codes() {
        let cases = [
            (CoreError::Unauthorized("no".to_string()), StatusCode::UNAUTHORIZED),
            (CoreError::Forbidden("no".to_string()), StatusCode::FORBIDDEN),
            (CoreError::NotFound("no".to_string()), StatusCode::NOT_FOUND),
            (CoreError::InvalidInput("no".to_string()), StatusCode::BAD_REQUEST),
        ];
        for (error, expected) in cases {
            let response = AppError::from(error).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn unclassified_errors_default_to_500() {
        let error = CoreError::Serialization(serde_json::from_str::<i64>("x").unwrap_err());
        let response = AppError::from(error).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn display_is_the_envelope_message() {
        let error = AppError::NotFound("Discussion not found".to_string());
        assert_eq!(error.to_string(), "Discussion not found");
    }
}
