//! HTTP-level middleware (cross-cutting concerns).
//!
//! Responsibility:
//! - Request-Id generation + propagation (X-Request-Id)
//! - Access logging / request tracing (TraceLayer)
//! - Body size limit and global timeout, both taken from `Config`

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::{StatusCode, header::HeaderName};
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn apply(router: Router, config: &Config) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    let layers = ServiceBuilder::new()
        // TimeoutLayer yields an error, not a response; turn it into a status.
        .layer(HandleErrorLayer::new(|err: BoxError| async move {
            if err.is::<tower::timeout::error::Elapsed>() {
                StatusCode::REQUEST_TIMEOUT
            } else {
                tracing::error!(error = %err, "unhandled middleware error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }))
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        .layer(RequestBodyLimitLayer::new(config.request_body_limit_bytes))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http());

    router.layer(layers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, header};
    use axum::routing::{get, post};
    use tower::ServiceExt;

    fn config(vars: &[(&str, &str)]) -> Config {
        Config::from_lookup(|key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        })
        .expect("config")
    }

    fn router() -> Router {
        Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "late"
                }),
            )
            .route("/upload", post(|body: String| async move { body.len().to_string() }))
    }

    #[tokio::test]
    async fn slow_requests_time_out_with_408() {
        let app = apply(router(), &config(&[("REQUEST_TIMEOUT_SECONDS", "1")]));

        let req = Request::get("/slow").body(Body::empty()).expect("request");
        let resp = app.oneshot(req).await.expect("response");

        assert_eq!(resp.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn bodies_over_the_limit_are_rejected() {
        let app = apply(router(), &config(&[("REQUEST_BODY_LIMIT_BYTES", "16")]));

        let small = Request::post("/upload")
            .header(header::CONTENT_LENGTH, 5)
            .body(Body::from("hello"))
            .expect("request");
        let resp = app.clone().oneshot(small).await.expect("response");
        assert_eq!(resp.status(), StatusCode::OK);

        let payload = "x".repeat(64);
        let large = Request::post("/upload")
            .header(header::CONTENT_LENGTH, payload.len())
            .body(Body::from(payload))
            .expect("request");
        let resp = app.oneshot(large).await.expect("response");
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn responses_carry_a_request_id() {
        let app = apply(router(), &config(&[]));

        let req = Request::post("/upload")
            .header(REQUEST_ID_HEADER, "req-42")
            .body(Body::from("hi"))
            .expect("request");
        let resp = app.oneshot(req).await.expect("response");

        assert_eq!(
            resp.headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok()),
            Some("req-42")
        );
    }
}
