//! Admin user management handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use gatekeeper_core::types::{ServiceId, UserId};

use crate::dto::request::{AdminCreateUserRequest, AdminUpdateUserRequest};
use crate::dto::response::{GrantResponse, MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AdminUser, ValidatedJson};
use crate::state::AppState;

/// GET /admin/
pub async fn list_users(
    State(state): State<AppState>,
    admin: AdminUser,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let default_lifetime = state.sessions.default_access_lifetime();
    let users = state.directory.list_users(&admin).await?;
    Ok(Json(
        users
            .into_iter()
            .map(|user| UserResponse::from_user(user, default_lifetime))
            .collect(),
    ))
}

/// POST /admin/
pub async fn create_user(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(req): ValidatedJson<AdminCreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state.directory.create_user(&admin, req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(UserResponse::from_user(
            user,
            state.sessions.default_access_lifetime(),
        )),
    ))
}

/// GET /admin/{id}
pub async fn get_user(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<UserId>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.directory.get_user(&admin, id).await?;
    Ok(Json(UserResponse::from_user(
        user,
        state.sessions.default_access_lifetime(),
    )))
}

/// PUT /admin/{id}
pub async fn update_user(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<UserId>,
    ValidatedJson(req): ValidatedJson<AdminUpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.directory.update_user(&admin, id, req.into()).await?;
    Ok(Json(UserResponse::from_user(
        user,
        state.sessions.default_access_lifetime(),
    )))
}

/// DELETE /admin/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<UserId>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.directory.delete_user(&admin, id).await?;
    Ok(Json(MessageResponse::new(format!("User {id} deleted"))))
}

/// POST /admin/{id}/access/{service_id}
pub async fn grant_access(
    State(state): State<AppState>,
    admin: AdminUser,
    Path((id, service_id)): Path<(UserId, ServiceId)>,
) -> Result<Json<GrantResponse>, ApiError> {
    let access = state.directory.grant_access(&admin, id, service_id).await?;
    Ok(Json(GrantResponse {
        message: format!("Service {service_id} granted to user {id}"),
        access,
    }))
}
