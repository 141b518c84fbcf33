//! Integration tests for admin user management.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_admin_routes_require_admin() {
    let app = helpers::TestApp::new();
    app.seed_admin().await;
    app.register("alice", "abc123").await;
    let token = app.login("alice", "abc123").await;

    let response = app.request("GET", "/admin/", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "ADMIN_REQUIRED");

    let response = app.request("GET", "/admin/", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_via_session_cookie() {
    let app = helpers::TestApp::new();
    app.seed_admin().await;
    let token = app.admin_token().await;

    let response = app
        .request_with_headers("GET", "/admin/", None, &[("Cookie", format!("token={token}"))])
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_create_get_update_user() {
    let app = helpers::TestApp::new();
    app.seed_admin().await;
    let admin = app.admin_token().await;

    let created = app
        .request(
            "POST",
            "/admin/",
            Some(serde_json::json!({
                "user_name": "Bob",
                "user_pass": "abc123",
                "access": "3,1",
                "jwt_expiration": "inf",
            })),
            Some(&admin),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["username"], "bob");
    assert_eq!(created.body["access"], "1,3");
    assert_eq!(created.body["jwt_expiration"], "inf");
    let id = created.body["id"].as_i64().unwrap();

    let fetched = app
        .request("GET", &format!("/admin/{id}"), None, Some(&admin))
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["is_admin"], false);

    let updated = app
        .request(
            "PUT",
            &format!("/admin/{id}"),
            Some(serde_json::json!({"is_admin": true, "jwt_expiration": 30})),
            Some(&admin),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["is_admin"], true);
    assert_eq!(updated.body["jwt_expiration"], "30");
    assert_eq!(updated.body["access"], "1,3");

    let token = app.login("bob", "abc123").await;
    let response = app.request("GET", "/admin/", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_oversized_lifetime_is_rejected() {
    let app = helpers::TestApp::new();
    app.seed_admin().await;
    let admin = app.admin_token().await;

    let created = app
        .request(
            "POST",
            "/admin/",
            Some(serde_json::json!({
                "user_name": "huge",
                "user_pass": "abc123",
                "jwt_expiration": 200000000,
            })),
            Some(&admin),
        )
        .await;
    assert_eq!(created.status, StatusCode::BAD_REQUEST);

    let bob = app.register("bob", "abc123").await;
    let updated = app
        .request(
            "PUT",
            &format!("/admin/{bob}"),
            Some(serde_json::json!({"jwt_expiration": "200000000"})),
            Some(&admin),
        )
        .await;
    assert_eq!(updated.status, StatusCode::BAD_REQUEST);

    let login = app.login_response("bob", "abc123").await;
    assert_eq!(login.status, StatusCode::OK);
}

#[tokio::test]
async fn test_null_lifetime_restores_default() {
    let app = helpers::TestApp::new();
    app.seed_admin().await;
    let admin = app.admin_token().await;
    let bob = app.register("bob", "abc123").await;

    let set = app
        .request(
            "PUT",
            &format!("/admin/{bob}"),
            Some(serde_json::json!({"jwt_expiration": "inf"})),
            Some(&admin),
        )
        .await;
    assert_eq!(set.body["jwt_expiration"], "inf");

    let cleared = app
        .request(
            "PUT",
            &format!("/admin/{bob}"),
            Some(serde_json::json!({"jwt_expiration": null})),
            Some(&admin),
        )
        .await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert_eq!(cleared.body["jwt_expiration"], "1");
}

#[tokio::test]
async fn test_update_with_empty_body() {
    let app = helpers::TestApp::new();
    app.seed_admin().await;
    let admin = app.admin_token().await;
    let bob = app.register("bob", "abc123").await;

    let response = app
        .request(
            "PUT",
            &format!("/admin/{bob}"),
            Some(serde_json::json!({})),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "NOTHING_TO_UPDATE");
}

#[tokio::test]
async fn test_admin_cannot_demote_or_delete_self() {
    let app = helpers::TestApp::new();
    let root = app.seed_admin().await;
    let admin = app.admin_token().await;

    let demote = app
        .request(
            "PUT",
            &format!("/admin/{root}"),
            Some(serde_json::json!({"is_admin": false})),
            Some(&admin),
        )
        .await;
    assert_eq!(demote.status, StatusCode::FORBIDDEN);
    assert_eq!(demote.error_code(), "SELF_DEMOTION");

    let delete = app
        .request("DELETE", &format!("/admin/{root}"), None, Some(&admin))
        .await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);
    assert_eq!(delete.error_code(), "SELF_DELETION");
}

#[tokio::test]
async fn test_delete_user_invalidates_their_tokens_for_services() {
    let app = helpers::TestApp::new();
    app.seed_admin().await;
    let admin = app.admin_token().await;
    let carol = app.register("carol", "abc123").await;
    let token = app.login("carol", "abc123").await;

    let deleted = app
        .request("DELETE", &format!("/admin/{carol}"), None, Some(&admin))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let again = app
        .request("DELETE", &format!("/admin/{carol}"), None, Some(&admin))
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(again.error_code(), "USER_NOT_FOUND");

    let me = app.request("GET", "/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
    assert_eq!(me.error_code(), "UNKNOWN_USER");
}

#[tokio::test]
async fn test_grant_access_is_idempotent() {
    let app = helpers::TestApp::new();
    app.seed_admin().await;
    let admin = app.admin_token().await;
    let dave = app.register("dave", "abc123").await;

    for _ in 0..2 {
        let response = app
            .request(
                "POST",
                &format!("/admin/{dave}/access/4"),
                None,
                Some(&admin),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["access"], "4");
    }

    let missing = app
        .request("POST", "/admin/999/access/4", None, Some(&admin))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}
