use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::Claims;

/// Hands the request's decoded `Claims` to a handler.
///
/// Relies on `middleware::auth::claims` having stored them in the request
/// extensions. Without that middleware the request is rejected with 401.
#[derive(Debug, Clone)]
pub struct AuthClaims(pub Claims);

impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthClaims)
            .ok_or_else(|| {
                AppError::unauthorized("MISSING_CLAIMS", "request carries no decoded claims")
            })
    }
}
