#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use habit_api_rust::config::AppConfig;
use habit_api_rust::{app, AppState};

pub const ANON_KEY: &str = "test-anon-key";
pub const SERVICE_KEY: &str = "test-service-key";
pub const USER_ID: &str = "user-1";
pub const TOKEN: &str = "token-user-1";

pub struct TestContext {
    /// Fake upstream serving both the identity and data APIs.
    pub server: mockito::ServerGuard,
    pub app: Router,
}

/// Build the router against a fresh mock upstream. Uses the real
/// `GoTrueVerifier`, so auth tests exercise the actual validation path.
pub async fn test_context() -> TestContext {
    let server = mockito::Server::new_async().await;
    let config = AppConfig {
        supabase_url: server.url(),
        anon_key: ANON_KEY.into(),
        service_role_key: SERVICE_KEY.into(),
        port: 0,
        upstream_timeout_secs: 5,
    };
    let state = AppState::from_config(&config).expect("app state");
    TestContext { server, app: app(state) }
}

/// Identity endpoint accepting the canonical test token.
pub async fn mock_verified_user(server: &mut mockito::ServerGuard) -> mockito::Mock {
    server
        .mock("GET", "/auth/v1/user")
        .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
        .match_header("apikey", SERVICE_KEY)
        .with_status(200)
        .with_body(json!({ "id": USER_ID }).to_string())
        .create_async()
        .await
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn authed_get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {}", TOKEN))
        .body(Body::empty())
        .unwrap()
}

pub fn authed_delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("authorization", format!("Bearer {}", TOKEN))
        .body(Body::empty())
        .unwrap()
}

pub fn authed_json(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", TOKEN))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Drive one request through the router and decode the response body.
/// Non-JSON bodies come back as a JSON string so tests can still assert on
/// raw upstream pass-through text.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}
