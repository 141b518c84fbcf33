//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use gatekeeper_core::types::UserId;

use super::access_list::AccessList;
use super::lifetime::TokenLifetime;

/// A registered user (`usr_info` row).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    #[sqlx(rename = "usr_id")]
    pub id: UserId,
    /// Unique, lowercase login name.
    #[sqlx(rename = "usr_login")]
    pub login: String,
    /// Argon2id PHC string.
    #[sqlx(rename = "usr_password")]
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Administrator flag.
    #[sqlx(rename = "usr_admin")]
    pub is_admin: bool,
    /// Services this user may reach.
    #[sqlx(rename = "usr_access")]
    pub access_list: AccessList,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// Per-user access-token lifetime; `None` means the configured default.
    #[sqlx(rename = "jwt_expiration")]
    pub token_lifetime: Option<TokenLifetime>,
}

impl User {
    /// The access-token lifetime to use for this user.
    pub fn access_lifetime(&self, default: TokenLifetime) -> TokenLifetime {
        self.token_lifetime.unwrap_or(default)
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Normalized login.
    pub login: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Administrator flag.
    pub is_admin: bool,
    /// Initial grants.
    pub access_list: AccessList,
    /// Lifetime override.
    pub token_lifetime: Option<TokenLifetime>,
}

impl NewUser {
    /// A regular self-registered user with no grants.
    pub fn regular(login: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password_hash: password_hash.into(),
            is_admin: false,
            access_list: AccessList::new(),
            token_lifetime: None,
        }
    }
}

/// Partial update of a user; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    /// New password hash.
    pub password_hash: Option<String>,
    /// New administrator flag.
    pub is_admin: Option<bool>,
    /// Replacement access list.
    pub access_list: Option<AccessList>,
    /// New lifetime override; `Some(None)` clears it back to the default.
    pub token_lifetime: Option<Option<TokenLifetime>>,
}

impl UserUpdate {
    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.password_hash.is_none()
            && self.is_admin.is_none()
            && self.access_list.is_none()
            && self.token_lifetime.is_none()
    }

    /// Applies the set fields to an in-memory user.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(hash) = &self.password_hash {
            user.password_hash = hash.clone();
        }
        if let Some(is_admin) = self.is_admin {
            user.is_admin = is_admin;
        }
        if let Some(access_list) = &self.access_list {
            user.access_list = access_list.clone();
        }
        if let Some(lifetime) = self.token_lifetime {
            user.token_lifetime = lifetime;
        }
    }
}
