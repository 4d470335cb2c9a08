#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use paper_service::config::{CorsSettings, GeminiSettings, PaperConfig, PaperSettings};
use paper_service::prompts::PaperTemplate;
use paper_service::services::MockTextProvider;
use paper_service::{build_router, AppState};
use secrecy::Secret;
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;

/// Router backed by `provider` and the built-in template.
pub fn router_with(provider: Arc<MockTextProvider>) -> Router {
    router_with_template(provider, PaperTemplate::default())
}

pub fn router_with_template(provider: Arc<MockTextProvider>, template: PaperTemplate) -> Router {
    build_router(AppState::new(provider, template))
}

/// Config with a random port and a dummy key.
pub fn test_config() -> PaperConfig {
    PaperConfig {
        common: service_core::config::Config { port: 0 },
        gemini: GeminiSettings {
            api_key: Secret::new("test-api-key".to_string()),
            api_base: "http://127.0.0.1:9".to_string(),
            timeout_secs: Some(5),
        },
        paper: PaperSettings::default(),
        cors: CorsSettings {
            allowed_origins: vec!["*".to_string()],
        },
    }
}

pub async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        router,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_raw(router: Router, uri: &str, body: &'static str) -> (StatusCode, Value) {
    post_with_content_type(router, uri, Some("application/json"), body).await
}

/// POST `body` as-is; `None` sends no `content-type` header.
pub async fn post_with_content_type(
    router: Router,
    uri: &str,
    content_type: Option<&str>,
    body: &'static str,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        request = request.header("content-type", content_type);
    }

    send(router, request.body(Body::from(body)).unwrap()).await
}

pub async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    send(
        router,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
