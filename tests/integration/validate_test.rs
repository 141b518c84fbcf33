//! Integration tests for token validation against the access list.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_validate_grant_flow() {
    let app = helpers::TestApp::new();
    app.seed_admin().await;
    let admin = app.admin_token().await;
    let alice = app.register("alice", "abc123").await;
    let token = app.login("alice", "abc123").await;

    let granted = app
        .request(
            "POST",
            &format!("/admin/{alice}/access/7"),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(granted.status, StatusCode::OK);
    assert_eq!(granted.body["access"], "7");

    let ok = app
        .request_with_headers(
            "GET",
            "/validate",
            None,
            &[
                ("Authorization", format!("Bearer {token}")),
                ("X-Service-ID", "7".to_string()),
            ],
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.body["user_id"].as_i64(), Some(alice.get()));
    assert_eq!(ok.body["user_name"], "alice");

    let denied = app
        .request_with_headers(
            "GET",
            "/validate",
            None,
            &[
                ("Authorization", format!("Bearer {token}")),
                ("X-Service-ID", "8".to_string()),
            ],
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(denied.error_code(), "ACCESS_DENIED");
}

#[tokio::test]
async fn test_validate_without_target() {
    let app = helpers::TestApp::new();
    app.register("bob", "abc123").await;
    let token = app.login("bob", "abc123").await;

    let response = app.request("GET", "/validate", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user_name"], "bob");
}

#[tokio::test]
async fn test_validate_accepts_session_cookie() {
    let app = helpers::TestApp::new();
    app.register("carol", "abc123").await;
    let token = app.login("carol", "abc123").await;

    let response = app
        .request_with_headers("GET", "/validate", None, &[("Cookie", format!("token={token}"))])
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_validate_rejects_non_numeric_service_id() {
    let app = helpers::TestApp::new();
    app.register("dave", "abc123").await;
    let token = app.login("dave", "abc123").await;

    let response = app
        .request_with_headers(
            "GET",
            "/validate",
            None,
            &[
                ("Authorization", format!("Bearer {token}")),
                ("X-Service-ID", "billing".to_string()),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_SERVICE_ID");
}

#[tokio::test]
async fn test_validate_rejects_tampered_token() {
    let app = helpers::TestApp::new();
    app.register("erin", "abc123").await;
    let token = app.login("erin", "abc123").await;

    let (unsigned, signature) = token.rsplit_once('.').unwrap();
    let forged: String = signature.chars().rev().collect();
    let tampered = format!("{unsigned}.{forged}");

    let response = app.request("GET", "/validate", None, Some(&tampered)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_validate_missing_credentials() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/validate", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "MISSING_CREDENTIALS");
}
