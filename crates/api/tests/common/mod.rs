#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use capkb_api::config::{LogFormat, ServerConfig, StorageBackend};
use capkb_api::router::build_app_router;
use capkb_api::state::AppState;
use capkb_core::memory_store::InMemoryStore;
use capkb_core::store::PracticeStore;

pub const ADMIN_KEY: &str = "test-admin-key";

/// Build a test `ServerConfig` with safe defaults.
///
/// The storage backend is never opened; tests hand the router a store directly.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8501".to_string()],
        request_timeout_secs: 30,
        storage: StorageBackend::File {
            path: "unused.json".into(),
        },
        admin_key: Some(ADMIN_KEY.to_string()),
        log_format: LogFormat::Pretty,
    }
}

/// Build the full application router over the given store.
///
/// Uses the same [`build_app_router`] as `main.rs`, so the middleware stack
/// under test is the production one.
pub fn build_test_app(store: Arc<dyn PracticeStore>) -> Router {
    let config = test_config();
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Router over a fresh, empty in-memory store.
pub fn empty_app() -> Router {
    build_test_app(Arc::new(InMemoryStore::new()))
}

fn request(method: Method, uri: &str, student: Option<&str>, body: Option<serde_json::Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(name) = student {
        builder = builder.header("x-student-name", name);
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, None, None)).await
}

/// POST a JSON body as `student` (no identity header when `None`).
pub async fn post_json(
    app: &Router,
    uri: &str,
    student: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, request(Method::POST, uri, student, Some(body))).await
}

pub async fn delete(app: &Router, uri: &str, student: Option<&str>) -> Response<Body> {
    send(app, request(Method::DELETE, uri, student, None)).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a practice as `student` and return its id.
pub async fn create_practice(app: &Router, student: &str, practice: &str) -> i64 {
    let response = post_json(
        app,
        "/api/v1/practices",
        Some(student),
        serde_json::json!({
            "category": "Cost of Equity",
            "practice": practice,
            "rationale": "Because it is standard.",
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Begin an edit as `student` and return the session token.
pub async fn begin_edit(app: &Router, student: &str, id: i64) -> serde_json::Value {
    let response = post_json(
        app,
        &format!("/api/v1/practices/{id}/edit"),
        Some(student),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    body_json(response).await["data"].clone()
}

/// Save an edit with the given practice text, keeping the snapshot's other fields.
pub async fn save_edit(
    app: &Router,
    student: &str,
    id: i64,
    session: &serde_json::Value,
    practice: &str,
) -> Response<Body> {
    let snapshot = &session["snapshot"];
    post_json(
        app,
        &format!("/api/v1/practices/{id}/edit/save"),
        Some(student),
        serde_json::json!({
            "session": session,
            "content": {
                "category": snapshot["category"],
                "practice": practice,
                "rationale": snapshot["rationale"],
            },
        }),
    )
    .await
}
