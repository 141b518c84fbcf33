//! Admin service registry handlers.

use axum::Json;
use axum::extract::{Path, State};

use gatekeeper_core::types::ServiceId;
use gatekeeper_entity::{Service, ServiceSummary};

use crate::dto::request::UpdateServiceBody;
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::{AdminUser, ValidatedJson};
use crate::state::AppState;

/// GET /admin/services/all
pub async fn list_all(
    State(state): State<AppState>,
    admin: AdminUser,
) -> Result<Json<Vec<ServiceSummary>>, ApiError> {
    Ok(Json(state.directory.list_all_services(&admin).await?))
}

/// PUT /admin/services/{id}
pub async fn update(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<ServiceId>,
    ValidatedJson(body): ValidatedJson<UpdateServiceBody>,
) -> Result<Json<Service>, ApiError> {
    let service = state
        .registry
        .update_service(&admin, id, body.into())
        .await?;
    Ok(Json(service))
}

/// DELETE /admin/services/{id}
pub async fn delete(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<ServiceId>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.registry.delete_service(&admin, id).await?;
    Ok(Json(MessageResponse::new(format!("Service {id} deleted"))))
}
