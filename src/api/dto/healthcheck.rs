use std::collections::BTreeMap;

use axum::http::HeaderMap;
use serde::Serialize;

use crate::services::auth::Claims;

#[derive(Debug, Serialize)]
pub struct HealthcheckResponse {
    pub message: &'static str,
    pub claims: Claims,
    pub headers: BTreeMap<String, String>,
}

/// Flatten request headers for echoing; repeated headers are joined with ", ".
pub fn echo_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .keys()
        .map(|name| {
            let joined = headers
                .get_all(name)
                .iter()
                .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
                .collect::<Vec<_>>()
                .join(", ");
            (name.as_str().to_owned(), joined)
        })
        .collect()
}
