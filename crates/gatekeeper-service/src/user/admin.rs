//! Admin user management: listing, creation, partial updates, deletion and
//! access grants.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};

use gatekeeper_auth::password::{PasswordHasher, PasswordValidator};
use gatekeeper_auth::{AdminIdentity, normalize_login};
use gatekeeper_core::config::AuthConfig;
use gatekeeper_core::error::{AppError, ErrorCode};
use gatekeeper_core::types::{ServiceId, UserId};
use gatekeeper_database::{ServiceStore, UserStore};
use gatekeeper_entity::{AccessList, NewUser, ServiceSummary, TokenLifetime, User, UserUpdate};

/// Request to create a user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserRequest {
    /// Login; normalized to lowercase.
    pub login: String,
    /// Initial password, checked against the password policy.
    pub password: String,
    /// Administrator flag.
    pub is_admin: bool,
    /// Initial grants.
    pub access_list: AccessList,
    /// Access-token lifetime override.
    pub token_lifetime: Option<TokenLifetime>,
}

/// Partial update of a user; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    /// New password, checked against the password policy and re-hashed.
    pub password: Option<String>,
    /// New administrator flag.
    pub is_admin: Option<bool>,
    /// Replacement access list.
    pub access_list: Option<AccessList>,
    /// New access-token lifetime; `Some(None)` restores the default.
    pub token_lifetime: Option<Option<TokenLifetime>>,
}

impl UpdateUserRequest {
    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.password.is_none()
            && self.is_admin.is_none()
            && self.access_list.is_none()
            && self.token_lifetime.is_none()
    }
}

/// Privileged CRUD over user records.
#[derive(Debug, Clone)]
pub struct AdminDirectory {
    users: Arc<dyn UserStore>,
    services: Arc<dyn ServiceStore>,
    hasher: PasswordHasher,
    validator: PasswordValidator,
}

impl AdminDirectory {
    /// Creates a new admin directory.
    pub fn new(
        users: Arc<dyn UserStore>,
        services: Arc<dyn ServiceStore>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            users,
            services,
            hasher: PasswordHasher::new(),
            validator: PasswordValidator::new(config),
        }
    }

    /// Lists every user.
    pub async fn list_users(&self, _admin: &AdminIdentity) -> Result<Vec<User>, AppError> {
        self.users.list_users().await
    }

    /// Gets a single user by id.
    pub async fn get_user(&self, _admin: &AdminIdentity, id: UserId) -> Result<User, AppError> {
        self.users
            .find_user(id)
            .await?
            .ok_or_else(|| AppError::user_not_found(id))
    }

    /// Creates a user with the given flags and grants.
    pub async fn create_user(
        &self,
        admin: &AdminIdentity,
        req: CreateUserRequest,
    ) -> Result<User, AppError> {
        let login = normalize_login(&req.login);
        if login.is_empty() {
            return Err(AppError::missing_field("user_name"));
        }
        if req.password.is_empty() {
            return Err(AppError::missing_field("user_pass"));
        }
        self.validator.validate(&req.password)?;

        let user = self
            .users
            .create_user(&NewUser {
                login,
                password_hash: self.hasher.hash(&req.password)?,
                is_admin: req.is_admin,
                access_list: req.access_list,
                token_lifetime: req.token_lifetime,
            })
            .await?;

        info!(
            admin_id = %admin.user_id(),
            user_id = %user.id,
            login = %user.login,
            is_admin = user.is_admin,
            "User created by admin"
        );
        Ok(user)
    }

    /// Applies a partial update to a user.
    pub async fn update_user(
        &self,
        admin: &AdminIdentity,
        id: UserId,
        req: UpdateUserRequest,
    ) -> Result<User, AppError> {
        if req.is_empty() {
            return Err(AppError::coded(
                ErrorCode::NothingToUpdate,
                "No fields to update",
            ));
        }
        if id == admin.user_id() && req.is_admin == Some(false) {
            warn!(admin_id = %id, "Admin attempted to remove their own admin flag");
            return Err(AppError::coded(
                ErrorCode::SelfDemotion,
                "You cannot remove your own admin privileges",
            ));
        }

        let password_hash = match req.password.as_deref() {
            Some(password) => {
                self.validator.validate(password)?;
                Some(self.hasher.hash(password)?)
            }
            None => None,
        };

        let update = UserUpdate {
            password_hash,
            is_admin: req.is_admin,
            access_list: req.access_list,
            token_lifetime: req.token_lifetime,
        };
        let user = self.users.update_user(id, &update).await?;

        info!(
            admin_id = %admin.user_id(),
            user_id = %user.id,
            password_changed = update.password_hash.is_some(),
            "User updated by admin"
        );
        Ok(user)
    }

    /// Deletes a user other than the caller.
    pub async fn delete_user(&self, admin: &AdminIdentity, id: UserId) -> Result<(), AppError> {
        if id == admin.user_id() {
            warn!(admin_id = %id, "Admin attempted to delete their own account");
            return Err(AppError::coded(
                ErrorCode::SelfDeletion,
                "You cannot delete your own account",
            ));
        }
        if !self.users.delete_user(id).await? {
            return Err(AppError::user_not_found(id));
        }

        info!(admin_id = %admin.user_id(), user_id = %id, "User deleted by admin");
        Ok(())
    }

    /// Adds a service to a user's access list.
    pub async fn grant_access(
        &self,
        admin: &AdminIdentity,
        id: UserId,
        service_id: ServiceId,
    ) -> Result<AccessList, AppError> {
        let access = self.users.grant_access(id, service_id).await?;
        info!(
            admin_id = %admin.user_id(),
            user_id = %id,
            service_id = %service_id,
            "Service access granted"
        );
        Ok(access)
    }

    /// Lists every registered service (id, name, description), by name.
    pub async fn list_all_services(
        &self,
        _admin: &AdminIdentity,
    ) -> Result<Vec<ServiceSummary>, AppError> {
        self.services.list_service_summaries().await
    }
}
