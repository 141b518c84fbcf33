//! Caller extractors backed by the access gateway.
//!
//! Both accept the token from the `Authorization: Bearer` header or, failing
//! that, from the session cookie.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use gatekeeper_auth::{AdminIdentity, Identity};

use crate::error::ApiError;
use crate::state::AppState;

/// An authenticated caller whose account still exists.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl std::ops::Deref for AuthUser {
    type Target = Identity;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = state.gateway.authenticate(&parts.headers).await?;
        Ok(Self(identity))
    }
}

/// An authenticated administrator.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AdminIdentity);

impl std::ops::Deref for AdminUser {
    type Target = AdminIdentity;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let admin = state.gateway.require_admin(&parts.headers).await?;
        Ok(Self(admin))
    }
}
