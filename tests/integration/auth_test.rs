//! Integration tests for registration, login, refresh and logout.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_register_then_login() {
    let app = helpers::TestApp::new();
    let id = app.register("Alice", "abc123").await;

    let response = app.login_response("alice", "abc123").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["id"].as_i64(), Some(id.get()));
    assert_eq!(response.body["user"]["username"], "alice");
    assert_eq!(response.body["isAdmin"], false);
    assert!(response.body["access_token"].is_string());
    assert!(response.body["refresh_token"].is_string());

    let cookie = response.set_cookie().expect("login sets the session cookie");
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_register_rejects_weak_password() {
    let app = helpers::TestApp::new();
    let response = app
        .request(
            "POST",
            "/register",
            Some(serde_json::json!({"user_name": "bob", "user_pass": "abcdef"})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "WEAK_PASSWORD");
}

#[tokio::test]
async fn test_register_requires_username() {
    let app = helpers::TestApp::new();
    let response = app
        .request(
            "POST",
            "/register",
            Some(serde_json::json!({"user_pass": "abc123"})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "MISSING_FIELD");
}

#[tokio::test]
async fn test_register_duplicate_login() {
    let app = helpers::TestApp::new();
    app.register("carol", "abc123").await;

    let response = app
        .request(
            "POST",
            "/register",
            Some(serde_json::json!({"user_name": "CAROL", "user_pass": "xyz789"})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), "USERNAME_TAKEN");
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = helpers::TestApp::new();
    app.register("dave", "abc123").await;

    let response = app.login_response("dave", "wrong999").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_login_nonexistent_user() {
    let app = helpers::TestApp::new();

    let response = app.login_response("nobody", "abc123").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_me_authenticated() {
    let app = helpers::TestApp::new();
    app.register("erin", "abc123").await;
    let token = app.login("erin", "abc123").await;

    let response = app.request("GET", "/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "erin");
    assert_eq!(response.body["jwt_expiration"], "1");
    assert!(response.body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_me_without_credentials() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "MISSING_CREDENTIALS");
}

#[tokio::test]
async fn test_refresh_issues_access_token() {
    let app = helpers::TestApp::new();
    app.register("frank", "abc123").await;
    let login = app.login_response("frank", "abc123").await;
    let refresh_token = login.body["refresh_token"].as_str().unwrap().to_string();

    let response = app
        .request(
            "POST",
            "/refresh",
            Some(serde_json::json!({"refresh_token": refresh_token})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["token_type"], "Bearer");
    assert!(response.set_cookie().is_some());

    let access_token = response.body["access_token"].as_str().unwrap();
    let me = app.request("GET", "/me", None, Some(access_token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["username"], "frank");
}

#[tokio::test]
async fn test_refresh_keeps_infinite_lifetime_of_admin_created_user() {
    let app = helpers::TestApp::new();
    app.seed_admin().await;
    let admin = app.admin_token().await;

    let created = app
        .request(
            "POST",
            "/admin/",
            Some(serde_json::json!({
                "user_name": "gina",
                "user_pass": "abc123",
                "jwt_expiration": "inf",
            })),
            Some(&admin),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["id"].as_i64().unwrap();

    let login = app.login_response("gina", "abc123").await;
    assert_eq!(login.status, StatusCode::OK);
    let codec = app.codec();
    let access = login.body["access_token"].as_str().unwrap();
    assert!(codec.decode(access).unwrap().expiration.is_never());
    let refresh_token = login.body["refresh_token"].as_str().unwrap().to_string();

    let shortened = app
        .request(
            "PUT",
            &format!("/admin/{id}"),
            Some(serde_json::json!({"jwt_expiration": 1})),
            Some(&admin),
        )
        .await;
    assert_eq!(shortened.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            "/refresh",
            Some(serde_json::json!({"refresh_token": refresh_token})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let refreshed = response.body["access_token"].as_str().unwrap();
    assert!(codec.decode(refreshed).unwrap().expiration.is_never());
}

#[tokio::test]
async fn test_refresh_with_garbage_token() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/refresh",
            Some(serde_json::json!({"refresh_token": "not-a-token"})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "MALFORMED_TOKEN");
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/logout", None, None).await;
    assert_eq!(response.status, StatusCode::OK);

    let cookie = response.set_cookie().expect("logout clears the session cookie");
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}
