//! Shared test helpers for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use gatekeeper_api::{AppState, build_app};
use gatekeeper_auth::TokenCodec;
use gatekeeper_core::config::AppConfig;
use gatekeeper_core::types::UserId;
use gatekeeper_database::MemoryStore;

pub const ADMIN_LOGIN: &str = "root";
pub const ADMIN_PASSWORD: &str = "admin123";

pub const TEST_SECRET: &str = "integration-test-secret";

const TEST_CONFIG: &str = r#"
[database]
url = "postgres://unused@localhost/unused"

[auth]
jwt_secret = "integration-test-secret"

[logging]
format = "pretty"
"#;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application state, for seeding through the service layer
    pub state: AppState,
    /// In-process store behind both repositories
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    /// Create a new test application over an empty in-memory store
    pub fn new() -> Self {
        let config = AppConfig::from_toml(TEST_CONFIG).expect("Failed to parse test config");
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(config, store.clone(), store.clone(), store.clone());
        let router = build_app(state.clone());

        Self {
            router,
            state,
            store,
        }
    }

    /// Seed the bootstrap administrator and return their id
    pub async fn seed_admin(&self) -> UserId {
        self.state
            .sessions
            .bootstrap_admin(ADMIN_LOGIN, ADMIN_PASSWORD)
            .await
            .expect("Failed to bootstrap admin")
            .expect("Admin already existed")
            .id
    }

    /// Register a user and return their id
    pub async fn register(&self, username: &str, password: &str) -> UserId {
        let response = self
            .request(
                "POST",
                "/register",
                Some(serde_json::json!({
                    "user_name": username,
                    "user_pass": password,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Register failed: {:?}",
            response.body
        );
        UserId(response.body["user"]["id"].as_i64().expect("No user id"))
    }

    /// Login and return the full response
    pub async fn login_response(&self, username: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            "/login",
            Some(serde_json::json!({
                "user_name": username,
                "user_pass": password,
            })),
            None,
        )
        .await
    }

    /// Login and return the access token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self.login_response(username, password).await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["access_token"]
            .as_str()
            .expect("No access_token in login response")
            .to_string()
    }

    /// A codec sharing the app's signing secret, for inspecting tokens
    pub fn codec(&self) -> TokenCodec {
        TokenCodec::new(TEST_SECRET)
    }

    /// Login as the seeded administrator
    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_LOGIN, ADMIN_PASSWORD).await
    }

    /// Make an HTTP request with an optional bearer token
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut headers = Vec::new();
        if let Some(token) = token {
            headers.push(("Authorization", format!("Bearer {token}")));
        }
        self.request_with_headers(method, path, body, &headers).await
    }

    /// Make an HTTP request with arbitrary extra headers
    pub async fn request_with_headers(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        headers: &[(&str, String)],
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        for (name, value) in headers {
            req = req.header(*name, value.as_str());
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            headers,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
    /// Response headers
    pub headers: HeaderMap,
}

impl TestResponse {
    /// The `error` code of an error body
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }

    /// The `Set-Cookie` header, if any
    pub fn set_cookie(&self) -> Option<String> {
        self.headers
            .get(http::header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }
}
