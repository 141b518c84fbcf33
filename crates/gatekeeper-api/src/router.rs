//! Route definitions for the Gatekeeper HTTP API.
//!
//! Paths keep the layout existing clients and downstream services call.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::handlers;
use crate::state::AppState;

/// Build the route table. Middleware is added by [`build_app`](crate::build_app).
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(auth_routes())
        .merge(service_routes())
        .merge(admin_routes())
        .route("/health", get(handlers::health::health))
        .with_state(state)
}

/// Register, login, logout, refresh, validate, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/logout", get(handlers::auth::logout))
        .route("/refresh", post(handlers::auth::refresh))
        .route("/validate", get(handlers::validate::validate))
        .route("/me", get(handlers::auth::me))
}

/// The caller's services
fn service_routes() -> Router<AppState> {
    Router::new().route(
        "/services",
        get(handlers::services::list_mine).post(handlers::services::create),
    )
}

/// Admin user and service management
fn admin_routes() -> Router<AppState> {
    use handlers::admin::{services, users};

    Router::new()
        .route("/admin/", get(users::list_users).post(users::create_user))
        .route("/admin/services/all", get(services::list_all))
        .route(
            "/admin/services/{id}",
            put(services::update).delete(services::delete),
        )
        .route(
            "/admin/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/admin/{id}/access/{service_id}", post(users::grant_access))
}
