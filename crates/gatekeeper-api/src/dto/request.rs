//! Request DTOs with validation.
//!
//! Field names follow the wire format clients already speak (`user_name`,
//! `srv_ip`, ...). Required fields default to empty so that an absent field
//! and a blank one both surface as `MISSING_FIELD` from the core.

use serde::{Deserialize, Deserializer};
use validator::Validate;

use gatekeeper_entity::{AccessList, ServiceUpdate, TokenLifetime};
use gatekeeper_service::{CreateServiceRequest, CreateUserRequest, UpdateUserRequest};

/// Register and login request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CredentialsRequest {
    /// Login.
    #[serde(default)]
    #[validate(length(max = 64, message = "Username is too long"))]
    pub user_name: String,
    /// Password.
    #[serde(default)]
    #[validate(length(max = 256, message = "Password is too long"))]
    pub user_pass: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshRequest {
    /// Refresh token.
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing 'refresh_token' field"))]
    pub refresh_token: String,
}

/// Create user request (admin).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AdminCreateUserRequest {
    /// Login.
    #[serde(default)]
    #[validate(length(max = 64, message = "Username is too long"))]
    pub user_name: String,
    /// Password.
    #[serde(default)]
    #[validate(length(max = 256, message = "Password is too long"))]
    pub user_pass: String,
    /// Administrator flag.
    #[serde(default)]
    pub is_admin: bool,
    /// Initial grants, as `"1,2"` or `[1, 2]`.
    #[serde(default)]
    pub access: AccessList,
    /// Access-token lifetime: a day count or `"inf"`.
    #[serde(default)]
    pub jwt_expiration: Option<TokenLifetime>,
}

impl From<AdminCreateUserRequest> for CreateUserRequest {
    fn from(req: AdminCreateUserRequest) -> Self {
        Self {
            login: req.user_name,
            password: req.user_pass,
            is_admin: req.is_admin,
            access_list: req.access,
            token_lifetime: req.jwt_expiration,
        }
    }
}

/// Partial user update (admin). Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AdminUpdateUserRequest {
    /// New password.
    #[validate(length(max = 256, message = "Password is too long"))]
    pub user_pass: Option<String>,
    /// New administrator flag.
    pub is_admin: Option<bool>,
    /// Replacement access list.
    pub access: Option<AccessList>,
    /// New access-token lifetime. `null` restores the configured default.
    #[serde(default, deserialize_with = "present")]
    pub jwt_expiration: Option<Option<TokenLifetime>>,
}

/// Maps a present field, `null` included, to `Some`. Absent fields fall
/// back to `None` through `#[serde(default)]`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<AdminUpdateUserRequest> for UpdateUserRequest {
    fn from(req: AdminUpdateUserRequest) -> Self {
        Self {
            password: req.user_pass,
            is_admin: req.is_admin,
            access_list: req.access,
            token_lifetime: req.jwt_expiration,
        }
    }
}

/// Service registration body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateServiceBody {
    /// Display name.
    #[serde(default)]
    #[validate(length(max = 255))]
    pub srv_name: String,
    /// Description.
    #[serde(default)]
    pub srv_desc: String,
    /// Image reference (URL or storage key).
    #[serde(default)]
    #[validate(length(max = 1024))]
    pub srv_image: String,
    /// Network address.
    #[serde(default)]
    #[validate(length(max = 255))]
    pub srv_ip: String,
}

impl From<CreateServiceBody> for CreateServiceRequest {
    fn from(body: CreateServiceBody) -> Self {
        Self {
            name: body.srv_name,
            description: body.srv_desc,
            image: body.srv_image,
            ip_address: body.srv_ip,
        }
    }
}

/// Partial service update (admin).
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateServiceBody {
    /// New display name.
    #[validate(length(max = 255))]
    pub srv_name: Option<String>,
    /// New description.
    pub srv_desc: Option<String>,
    /// New image reference.
    #[validate(length(max = 1024))]
    pub srv_image: Option<String>,
    /// New network address.
    #[validate(length(max = 255))]
    pub srv_ip: Option<String>,
}

impl From<UpdateServiceBody> for ServiceUpdate {
    fn from(body: UpdateServiceBody) -> Self {
        Self {
            name: body.srv_name,
            description: body.srv_desc,
            image: body.srv_image,
            ip_address: body.srv_ip,
        }
    }
}
