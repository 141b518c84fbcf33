//! The validation entry point used by every downstream service.
//!
//! Confirms a token's signature and expiry and, when a target service is
//! named, that the service is in the user's access list. Admin-only
//! operations take an [`AdminIdentity`], which only this module can build.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use http::HeaderMap;
use serde::Serialize;
use tracing::{debug, warn};

use gatekeeper_core::error::{AppError, ErrorCode};
use gatekeeper_core::types::{ServiceId, UserId};
use gatekeeper_database::UserStore;
use gatekeeper_entity::User;

use crate::credentials::CredentialChain;
use crate::jwt::{Claims, TokenCodec};

/// Who a valid token was issued to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    /// The user id claim.
    pub user_id: UserId,
    /// The username claim.
    pub user_name: String,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            user_name: claims.user_name,
        }
    }
}

/// Proof that the caller is an administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    user_id: UserId,
    user_name: String,
}

impl AdminIdentity {
    /// The administrator's user id.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// The administrator's login.
    pub fn user_name(&self) -> &str {
        &self.user_name
    }
}

/// Token validation and access-list enforcement.
#[derive(Debug, Clone)]
pub struct AccessGateway {
    codec: Arc<TokenCodec>,
    users: Arc<dyn UserStore>,
    credentials: Arc<CredentialChain>,
}

impl AccessGateway {
    /// Creates a gateway over the given codec, user store and credential chain.
    pub fn new(
        codec: Arc<TokenCodec>,
        users: Arc<dyn UserStore>,
        credentials: CredentialChain,
    ) -> Self {
        Self {
            codec,
            users,
            credentials: Arc::new(credentials),
        }
    }

    /// Validates a token, and its access to `target` when one is given.
    pub async fn validate(
        &self,
        token: &str,
        target: Option<ServiceId>,
    ) -> Result<Identity, AppError> {
        self.validate_at(token, target, Utc::now()).await
    }

    /// [`validate`](Self::validate) against an explicit clock.
    pub async fn validate_at(
        &self,
        token: &str,
        target: Option<ServiceId>,
        now: DateTime<Utc>,
    ) -> Result<Identity, AppError> {
        let claims = self.verified_claims(token, now)?;

        if let Some(service_id) = target {
            let user = self.load_user(claims.user_id).await?;
            if !user.access_list.contains(service_id) {
                warn!(
                    user_id = %user.id,
                    service_id = %service_id,
                    "Access denied to service"
                );
                return Err(AppError::coded(
                    ErrorCode::AccessDenied,
                    format!("Access to service {service_id} denied"),
                ));
            }
            debug!(user_id = %user.id, service_id = %service_id, "Access granted");
        }

        Ok(claims.into())
    }

    /// The raw token carried by a request, header first, then cookie.
    pub fn credential(&self, headers: &HeaderMap) -> Result<String, AppError> {
        self.credentials.resolve(headers)
    }

    /// Resolves the caller's credential and returns their current record.
    pub async fn authenticate_user(&self, headers: &HeaderMap) -> Result<User, AppError> {
        let token = self.credentials.resolve(headers)?;
        let claims = self.verified_claims(&token, Utc::now())?;
        self.load_user(claims.user_id).await
    }

    /// Resolves and validates the caller's credential.
    pub async fn authenticate(&self, headers: &HeaderMap) -> Result<Identity, AppError> {
        let user = self.authenticate_user(headers).await?;
        Ok(Identity {
            user_id: user.id,
            user_name: user.login,
        })
    }

    /// Resolves the caller's credential and requires the admin flag.
    pub async fn require_admin(&self, headers: &HeaderMap) -> Result<AdminIdentity, AppError> {
        let user = self.authenticate_user(headers).await?;
        if !user.is_admin {
            warn!(user_id = %user.id, "Admin privileges required");
            return Err(AppError::coded(
                ErrorCode::AdminRequired,
                "Admin privileges required",
            ));
        }
        Ok(AdminIdentity {
            user_id: user.id,
            user_name: user.login,
        })
    }

    fn verified_claims(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AppError> {
        let claims = self.codec.decode(token)?;
        claims.check_expiry(now)?;
        Ok(claims)
    }

    async fn load_user(&self, id: UserId) -> Result<User, AppError> {
        self.users
            .find_user(id)
            .await?
            .ok_or_else(|| AppError::coded(ErrorCode::UnknownUser, "User not found"))
    }
}
