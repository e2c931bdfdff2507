/*
 * Responsibility
 * - URL layout
 * - Which routes sit behind the claims middleware
 */
use axum::{Router, routing::get};

use crate::api::handlers::{healthcheck::healthcheck_no_verify, root::root};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new().route("/", get(root));

    let protected = Router::new().route("/healthcheck/no-verify", get(healthcheck_no_verify));
    let protected = middleware::auth::claims::apply(protected, state);

    public.merge(protected)
}
