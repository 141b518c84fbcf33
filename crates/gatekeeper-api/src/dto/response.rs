//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gatekeeper_core::types::UserId;
use gatekeeper_entity::{AccessList, TokenLifetime, User};

/// A user as shown to clients. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User id.
    pub id: UserId,
    /// Login.
    pub username: String,
    /// Administrator flag.
    pub is_admin: bool,
    /// Granted services, as `"1,2"`.
    pub access: AccessList,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// Effective access-token lifetime (`"inf"` or a day count).
    pub jwt_expiration: TokenLifetime,
}

impl UserResponse {
    /// Projects a user, resolving an unset lifetime to `default_lifetime`.
    pub fn from_user(user: User, default_lifetime: TokenLifetime) -> Self {
        Self {
            jwt_expiration: user.access_lifetime(default_lifetime),
            id: user.id,
            username: user.login,
            is_admin: user.is_admin,
            access: user.access_list,
            created_at: user.created_at,
        }
    }
}

/// Registration response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Confirmation message.
    pub message: String,
    /// The new user.
    pub user: UserResponse,
}

/// Identity summary embedded in the login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginUser {
    /// User id.
    pub id: UserId,
    /// Login.
    pub username: String,
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Who logged in.
    pub user: LoginUser,
    /// Administrator flag.
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

/// Refresh response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// New access token, without any scheme prefix.
    pub access_token: String,
    /// Always `"Bearer"`.
    pub token_type: String,
}

/// Access grant response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantResponse {
    /// Confirmation message.
    pub message: String,
    /// The user's access list after the grant.
    pub access: AccessList,
}

/// Generic message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message text.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"`, or `"degraded"` when the store cannot be reached.
    pub status: String,
    /// Crate version.
    pub version: String,
}
