//! Shared helpers for the HTTP-level tests

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use dine_server::auth::JwtConfig;
use dine_server::services::restaurant::{BootstrapAccount, bootstrap};
use dine_server::{Config, DbService, ServerState, build_app};
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const PASSWORD: &str = "correct horse battery";

pub struct TestApp {
    pub app: Router,
    pub state: ServerState,
    pub restaurant_id: i64,
    pub token: String,
    _dir: TempDir,
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-with-32-chars!!".into(),
        expiration_minutes: 15,
        refresh_expiration_minutes: 60,
        issuer: "dine-server".into(),
        audience: "dine-admin".into(),
    }
}

/// App over an in-memory database with one bootstrapped restaurant
pub async fn spawn() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_work_dir(dir.path().to_string_lossy(), jwt_config());
    let db = DbService::in_memory().await.unwrap();
    let state = ServerState::new(config, db.pool);

    let staff = bootstrap(
        &state.db,
        &BootstrapAccount {
            restaurant_name: "Spice Route".into(),
            username: "owner".into(),
            password: PASSWORD.into(),
        },
    )
    .await
    .unwrap();
    let token = state.get_jwt_service().issue_pair(staff.info()).unwrap().access;

    TestApp {
        app: build_app(&state),
        restaurant_id: staff.restaurant_id,
        state,
        token,
        _dir: dir,
    }
}

impl TestApp {
    /// Second restaurant with its own staff account; returns (restaurant_id, token)
    pub async fn other_restaurant(&self) -> (i64, String) {
        let staff = bootstrap(
            &self.state.db,
            &BootstrapAccount {
                restaurant_name: "Noodle Bar".into(),
                username: "other-owner".into(),
                password: PASSWORD.into(),
            },
        )
        .await
        .unwrap();
        let token = self
            .state
            .get_jwt_service()
            .issue_pair(staff.info())
            .unwrap()
            .access;
        (staff.restaurant_id, token)
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(json_request(Method::GET, uri, token, None)).await
    }

    /// Admin call authenticated as the bootstrapped staff member
    pub async fn admin(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.send(json_request(method, uri, Some(&self.token), body))
            .await
    }

    pub async fn public(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.send(json_request(method, uri, None, body)).await
    }
}

pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Single-part multipart body
pub fn multipart_request(
    uri: &str,
    token: &str,
    field: &str,
    file_name: &str,
    content: &[u8],
) -> Request<Body> {
    const BOUNDARY: &str = "dine-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
