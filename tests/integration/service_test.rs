//! Integration tests for the service registry.

mod helpers;

use http::StatusCode;
use serde_json::Value;

fn service_body(name: &str) -> Value {
    serde_json::json!({
        "srv_name": name,
        "srv_desc": format!("{name} backend"),
        "srv_image": format!("img/{name}.png"),
        "srv_ip": "10.0.0.5",
    })
}

#[tokio::test]
async fn test_create_service_grants_creator() {
    let app = helpers::TestApp::new();
    app.register("alice", "abc123").await;
    let token = app.login("alice", "abc123").await;

    let created = app
        .request("POST", "/services", Some(service_body("billing")), Some(&token))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["srv_id"].as_i64().unwrap();

    let mine = app.request("GET", "/services", None, Some(&token)).await;
    assert_eq!(mine.status, StatusCode::OK);
    assert_eq!(mine.body.as_array().map(Vec::len), Some(1));
    assert_eq!(mine.body[0]["srv_name"], "billing");

    let validated = app
        .request_with_headers(
            "GET",
            "/validate",
            None,
            &[
                ("Authorization", format!("Bearer {token}")),
                ("X-Service-ID", id.to_string()),
            ],
        )
        .await;
    assert_eq!(validated.status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_service_requires_every_field() {
    let app = helpers::TestApp::new();
    app.register("bob", "abc123").await;
    let token = app.login("bob", "abc123").await;

    let response = app
        .request(
            "POST",
            "/services",
            Some(serde_json::json!({"srv_name": "billing", "srv_desc": "x", "srv_image": "y"})),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "MISSING_FIELD");
}

#[tokio::test]
async fn test_services_require_credentials() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/services", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_service_management() {
    let app = helpers::TestApp::new();
    app.seed_admin().await;
    let admin = app.admin_token().await;
    app.register("carol", "abc123").await;
    let token = app.login("carol", "abc123").await;

    for name in ["zeta", "alpha"] {
        let created = app
            .request("POST", "/services", Some(service_body(name)), Some(&token))
            .await;
        assert_eq!(created.status, StatusCode::CREATED);
    }

    let all = app
        .request("GET", "/admin/services/all", None, Some(&admin))
        .await;
    assert_eq!(all.status, StatusCode::OK);
    let names: Vec<&str> = all
        .body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|s| s["srv_name"].as_str())
        .collect();
    assert_eq!(names, vec!["alpha", "zeta"]);
    let alpha = all.body[0]["srv_id"].as_i64().unwrap();

    let updated = app
        .request(
            "PUT",
            &format!("/admin/services/{alpha}"),
            Some(serde_json::json!({"srv_desc": "First"})),
            Some(&admin),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["srv_desc"], "First");

    let forbidden = app
        .request("GET", "/admin/services/all", None, Some(&token))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let deleted = app
        .request("DELETE", &format!("/admin/services/{alpha}"), None, Some(&admin))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let missing = app
        .request("DELETE", &format!("/admin/services/{alpha}"), None, Some(&admin))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.error_code(), "SERVICE_NOT_FOUND");

    let mine = app.request("GET", "/services", None, Some(&token)).await;
    assert_eq!(mine.body.as_array().map(Vec::len), Some(1));
}
