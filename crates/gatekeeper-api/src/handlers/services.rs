//! Caller-scoped service catalogue handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use gatekeeper_entity::Service;

use crate::dto::request::CreateServiceBody;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /services
pub async fn list_mine(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Service>>, ApiError> {
    Ok(Json(state.registry.list_for_user(&auth).await?))
}

/// POST /services
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<CreateServiceBody>,
) -> Result<(StatusCode, Json<Service>), ApiError> {
    let service = state.registry.create_service(&auth, body.into()).await?;
    Ok((StatusCode::CREATED, Json(service)))
}
