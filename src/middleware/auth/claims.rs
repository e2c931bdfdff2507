//! Bearer token → `Claims`, stored in request extensions.
//!
//! The gateway in front of this service has already verified the token
//! signature, so this layer only extracts and types the claims (see
//! `services::auth::decoder`). Handlers read the result through
//! `AuthClaims`.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::auth::{AuthResult, Claims, bearer_from_headers};
use crate::state::AppState;

/// Require decodable claims on every route of `router`.
///
/// ```ignore
/// let protected = Router::new().route("/healthcheck/no-verify", get(healthcheck));
/// let protected = middleware::auth::claims::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // route_layer: unmatched paths still 404 instead of 401
    router.route_layer(middleware::from_fn_with_state(state, claims_middleware))
}

async fn claims_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let claims = match decode_request_claims(&state, &req) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(
                code = err.code(),
                status = err.status().as_u16(),
                error = %err,
                "rejecting request: bearer claims unavailable"
            );
            return Err(err.into());
        }
    };

    tracing::debug!(
        sub = claims.subject(),
        jti = claims.token_id(),
        iss = claims.issuer(),
        "bearer claims extracted"
    );

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

fn decode_request_claims(state: &AppState, req: &Request<Body>) -> AuthResult<Claims> {
    let token = bearer_from_headers(req.headers())?;
    state.claims_decoder.decode(token)
}
