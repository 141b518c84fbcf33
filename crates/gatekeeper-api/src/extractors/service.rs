//! The optional target-service header on `/validate`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use gatekeeper_core::error::{AppError, ErrorCode};
use gatekeeper_core::types::ServiceId;

use crate::error::ApiError;

/// Header naming the downstream service a token is presented to.
pub const SERVICE_ID_HEADER: &str = "x-service-id";

/// The parsed `X-Service-ID` header, if present and non-blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceTarget(pub Option<ServiceId>);

impl<S: Send + Sync> FromRequestParts<S> for ServiceTarget {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(SERVICE_ID_HEADER) else {
            return Ok(Self(None));
        };
        let invalid = || {
            AppError::coded(
                ErrorCode::InvalidServiceId,
                "X-Service-ID must be a numeric service id",
            )
        };

        let raw = value.to_str().map_err(|_| invalid())?.trim();
        if raw.is_empty() {
            return Ok(Self(None));
        }
        let id = raw.parse::<ServiceId>().map_err(|_| invalid())?;
        Ok(Self(Some(id)))
    }
}
