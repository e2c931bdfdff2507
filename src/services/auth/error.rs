/*
 * Responsibility
 * - Failure kinds of the claims pipeline (header extraction / token decode / schema mapping)
 * - Each kind knows its HTTP status and a stable error code
 * - Messages carry the underlying cause but never the token itself
 */
use axum::http::StatusCode;
use jsonwebtoken::Algorithm;
use thiserror::Error;

use super::claims::ClaimField;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No Authorization header")]
    MissingAuthHeader,

    #[error("Invalid Authorization header format")]
    MalformedAuthHeader,

    #[error("Error decoding token: {0}")]
    TokenDecode(#[from] DecodeFailure),

    #[error("Failed to decode JWT: empty payload")]
    EmptyPayload,

    #[error("Invalid token claims: {field} {violation}")]
    SchemaValidation {
        field: ClaimField,
        violation: SchemaViolation,
    },
}

impl AuthError {
    pub fn schema(field: ClaimField, violation: SchemaViolation) -> Self {
        Self::SchemaValidation { field, violation }
    }

    /// 401 for header problems, 400 for anything found inside the token.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingAuthHeader | Self::MalformedAuthHeader => StatusCode::UNAUTHORIZED,
            Self::TokenDecode(_) | Self::EmptyPayload | Self::SchemaValidation { .. } => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingAuthHeader => "MISSING_AUTH_HEADER",
            Self::MalformedAuthHeader => "MALFORMED_AUTH_HEADER",
            Self::TokenDecode(_) => "TOKEN_DECODE_ERROR",
            Self::EmptyPayload => "EMPTY_PAYLOAD",
            Self::SchemaValidation { .. } => "SCHEMA_VALIDATION_ERROR",
        }
    }
}

/// Structural problems with the compact token itself.
#[derive(Debug, Error)]
pub enum DecodeFailure {
    #[error("expected 3 segments, found {0}")]
    SegmentCount(usize),

    #[error("invalid base64url in {segment} segment: {source}")]
    Encoding {
        segment: &'static str,
        #[source]
        source: base64::DecodeError,
    },

    #[error("invalid JSON in {segment} segment: {source}")]
    Json {
        segment: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{segment} segment must be a JSON object")]
    NotAnObject { segment: &'static str },

    #[error("header has no 'alg' field")]
    MissingAlgorithm,

    #[error("unexpected algorithm '{found}', expected {expected:?}")]
    AlgorithmMismatch { expected: Algorithm, found: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("is missing")]
    Missing,

    #[error("must not be empty")]
    Empty,

    #[error("must be {expected}")]
    WrongType { expected: &'static str },
}
