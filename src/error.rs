/*
 * Responsibility
 * - App-wide ApiError definition
 * - IntoResponse (HTTP status / JSON error body)
 * - Converts claims pipeline failures (AuthError) into a single response shape
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::AuthError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    BadRequest { code: &'static str, message: String },
    #[error("{message}")]
    Unauthorized { code: &'static str, message: String },
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn unauthorized(code: &'static str, message: impl Into<String>) -> Self {
        Self::Unauthorized {
            code,
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            AppError::Unauthorized { code, message } => (StatusCode::UNAUTHORIZED, code, message),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        let code = e.code();
        if e.status() == StatusCode::UNAUTHORIZED {
            AppError::unauthorized(code, e.to_string())
        } else {
            AppError::bad_request(code, e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::{ClaimField, DecodeFailure, SchemaViolation};

    #[test]
    fn header_failures_become_unauthorized() {
        let err = AppError::from(AuthError::MissingAuthHeader);
        assert!(matches!(
            err,
            AppError::Unauthorized {
                code: "MISSING_AUTH_HEADER",
                ..
            }
        ));
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn decode_failures_become_bad_request_with_cause() {
        let err = AppError::from(AuthError::from(DecodeFailure::SegmentCount(1)));
        assert_eq!(err.to_string(), "Error decoding token: expected 3 segments, found 1");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        let err = AppError::from(AuthError::schema(
            ClaimField::Audience,
            SchemaViolation::Empty,
        ));
        assert!(matches!(
            err,
            AppError::BadRequest {
                code: "SCHEMA_VALIDATION_ERROR",
                ..
            }
        ));
    }
}
