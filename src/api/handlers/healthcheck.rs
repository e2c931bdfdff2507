/*
 * Responsibility
 * - GET /healthcheck/no-verify
 * - Echo the decoded claims and the request headers so gateway wiring can be checked end to end
 */
use axum::{Json, http::HeaderMap};

use crate::api::dto::healthcheck::{HealthcheckResponse, echo_headers};
use crate::api::extractors::AuthClaims;

pub async fn healthcheck_no_verify(
    AuthClaims(claims): AuthClaims,
    headers: HeaderMap,
) -> Json<HealthcheckResponse> {
    Json(HealthcheckResponse {
        message: "Claims extracted successfully",
        claims,
        headers: echo_headers(&headers),
    })
}
