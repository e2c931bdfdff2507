//! `Authorization: Bearer <token>` parsing.
//!
//! Only the header shape is checked here; what the token contains is the
//! decoder's business.

use axum::http::{HeaderMap, header};

use super::error::{AuthError, AuthResult};

const BEARER: &str = "Bearer";

/// Pull the bearer token out of a raw `Authorization` header value.
///
/// The value must be exactly `<scheme> <token>` separated by whitespace, with a
/// case-insensitive `Bearer` scheme. The token is returned as-is.
pub fn extract_bearer(header: Option<&str>) -> AuthResult<&str> {
    let value = header
        .filter(|value| !value.is_empty())
        .ok_or(AuthError::MissingAuthHeader)?;

    let mut parts = value.split_whitespace();
    let (Some(scheme), Some(token), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(AuthError::MalformedAuthHeader);
    };

    if !scheme.eq_ignore_ascii_case(BEARER) {
        return Err(AuthError::MalformedAuthHeader);
    }

    Ok(token)
}

/// Same as [`extract_bearer`], reading the first `Authorization` header.
pub fn bearer_from_headers(headers: &HeaderMap) -> AuthResult<&str> {
    let value = match headers.get(header::AUTHORIZATION) {
        Some(value) => Some(value.to_str().map_err(|_| AuthError::MalformedAuthHeader)?),
        None => None,
    };
    extract_bearer(value)
}
