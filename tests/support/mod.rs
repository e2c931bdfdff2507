#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use bearer_claims::app::build_router;
use bearer_claims::config::Config;
use bearer_claims::state::AppState;
use http_body_util::BodyExt;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use tower::ServiceExt;

pub fn app() -> Router {
    app_with(&[])
}

pub fn app_with(vars: &[(&str, &str)]) -> Router {
    let vars: Vec<(String, String)> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let config = Config::from_lookup(|key| {
        vars.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .expect("test config");

    build_router(AppState::from_config(&config), &config)
}

pub fn required_claims() -> Value {
    json!({
        "exp": 1700000000,
        "iat": 1699999000,
        "jti": "abc-123",
        "iss": "idp",
        "aud": "svc",
        "sub": "user-1"
    })
}

/// HS256 token signed with a throwaway secret the service never sees.
pub fn signed_token(claims: &Value) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(b"gateway-only-secret"),
    )
    .expect("sign token")
}

/// Token with an arbitrary header and a dummy signature.
pub fn unsigned_token(header: &Value, payload: &Value) -> String {
    let encode_json = |value: &Value| URL_SAFE_NO_PAD.encode(serde_json::to_vec(value).expect("json"));
    format!(
        "{}.{}.{}",
        encode_json(header),
        encode_json(payload),
        URL_SAFE_NO_PAD.encode(b"dummy")
    )
}

pub async fn get(app: Router, uri: &str, authorization: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    let req = builder.body(Body::empty()).expect("request");
    app.oneshot(req).await.expect("response")
}

pub async fn json_body(resp: Response<Body>) -> Value {
    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}
