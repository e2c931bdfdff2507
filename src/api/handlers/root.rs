/*
 * Responsibility
 * - GET / (reachability check, no claims required)
 */
use axum::{Json, response::IntoResponse};
use serde_json::json;

pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": "hello" }))
}
