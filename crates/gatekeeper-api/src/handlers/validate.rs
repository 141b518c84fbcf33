//! Token validation for downstream services.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;

use gatekeeper_auth::Identity;

use crate::error::ApiError;
use crate::extractors::ServiceTarget;
use crate::state::AppState;

/// GET /validate
///
/// Returns the token's identity. With `X-Service-ID`, also requires the
/// service to be in the user's access list.
pub async fn validate(
    State(state): State<AppState>,
    ServiceTarget(target): ServiceTarget,
    headers: HeaderMap,
) -> Result<Json<Identity>, ApiError> {
    let token = state.gateway.credential(&headers)?;
    let identity = state.gateway.validate(&token, target).await?;
    Ok(Json(identity))
}
