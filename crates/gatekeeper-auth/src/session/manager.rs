//! Session flows: register, login, refresh and logout.
//!
//! Tokens are stateless. Logout only clears the client cookie; a token that
//! was already handed out stays valid until it expires.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use gatekeeper_core::config::AuthConfig;
use gatekeeper_core::error::{AppError, ErrorCode};
use gatekeeper_database::UserStore;
use gatekeeper_entity::{MAX_LIFETIME_DAYS, NewUser, TokenLifetime, User};

use crate::gateway::Identity;
use crate::jwt::TokenCodec;
use crate::password::{PasswordHasher, PasswordValidator};

/// Trims and lowercases a login.
pub fn normalize_login(login: &str) -> String {
    login.trim().to_lowercase()
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// The authenticated user.
    pub user: User,
}

/// Issues tokens for users.
#[derive(Clone)]
pub struct AuthSessionManager {
    codec: Arc<TokenCodec>,
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    policy: PasswordValidator,
    config: AuthConfig,
}

impl std::fmt::Debug for AuthSessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSessionManager")
            .field("access_token_days", &self.config.access_token_days)
            .field("refresh_token_days", &self.config.refresh_token_days)
            .finish()
    }
}

impl AuthSessionManager {
    /// Creates a session manager.
    pub fn new(codec: Arc<TokenCodec>, users: Arc<dyn UserStore>, config: AuthConfig) -> Self {
        Self {
            codec,
            users,
            hasher: PasswordHasher::new(),
            policy: PasswordValidator::new(&config),
            config,
        }
    }

    /// Access-token lifetime for users without an override.
    pub fn default_access_lifetime(&self) -> TokenLifetime {
        TokenLifetime::Days(self.config.access_token_days.clamp(1, MAX_LIFETIME_DAYS))
    }

    fn refresh_lifetime(&self) -> TokenLifetime {
        TokenLifetime::Days(self.config.refresh_token_days.clamp(1, MAX_LIFETIME_DAYS))
    }

    /// Registers a regular user with no grants.
    pub async fn register(&self, login: &str, password: &str) -> Result<User, AppError> {
        let login = normalize_login(login);
        require_credentials(&login, password)?;
        self.policy.validate(password)?;

        let password_hash = self.hasher.hash(password)?;
        let user = self
            .users
            .create_user(&NewUser::regular(login, password_hash))
            .await?;

        info!(user_id = %user.id, login = %user.login, "User registered");
        Ok(user)
    }

    /// Verifies credentials and issues an access/refresh token pair.
    pub async fn login(&self, login: &str, password: &str) -> Result<LoginResult, AppError> {
        self.login_at(login, password, Utc::now()).await
    }

    /// [`login`](Self::login) against an explicit clock.
    pub async fn login_at(
        &self,
        login: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<LoginResult, AppError> {
        let login = normalize_login(login);
        require_credentials(&login, password)?;
        self.policy.validate(password)?;

        let Some(user) = self.users.find_user_by_login(&login).await? else {
            warn!(login = %login, "Login failed: unknown user");
            return Err(invalid_credentials());
        };
        if !self.hasher.verify(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(invalid_credentials());
        }

        let access_lifetime = user.access_lifetime(self.default_access_lifetime());
        let access_token = self
            .codec
            .encode_at(user.id, &user.login, access_lifetime, now)?;
        let refresh_token = self.codec.encode_refresh_at(
            user.id,
            &user.login,
            self.refresh_lifetime(),
            access_lifetime,
            now,
        )?;

        info!(
            user_id = %user.id,
            access_lifetime = %access_lifetime,
            "Login successful"
        );
        Ok(LoginResult {
            access_token,
            refresh_token,
            user,
        })
    }

    /// Mints a new access token from a refresh token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, AppError> {
        self.refresh_at(refresh_token, Utc::now()).await
    }

    /// [`refresh`](Self::refresh) against an explicit clock.
    pub async fn refresh_at(
        &self,
        refresh_token: &str,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let claims = self.codec.decode(refresh_token)?;
        claims.check_expiry(now)?;

        let user = self
            .users
            .find_user(claims.user_id)
            .await?
            .ok_or_else(|| AppError::coded(ErrorCode::UnknownUser, "User not found"))?;

        let lifetime = claims
            .lifetime
            .unwrap_or_else(|| user.access_lifetime(self.default_access_lifetime()));
        let token = self.codec.encode_at(user.id, &user.login, lifetime, now)?;

        info!(user_id = %user.id, "Access token refreshed");
        Ok(token)
    }

    /// Ends a client session. Tokens are not revoked.
    pub fn logout(&self, caller: Option<&Identity>) {
        match caller {
            Some(identity) => info!(user_id = %identity.user_id, "User logged out"),
            None => info!("Anonymous logout"),
        }
    }

    /// The caller's current record.
    pub async fn profile(&self, identity: &Identity) -> Result<User, AppError> {
        self.users
            .find_user(identity.user_id)
            .await?
            .ok_or_else(|| AppError::coded(ErrorCode::UnknownUser, "User not found"))
    }

    /// Creates the configured administrator if no user has that login.
    ///
    /// Returns the created user, or `None` when the login already exists.
    pub async fn bootstrap_admin(
        &self,
        login: &str,
        password: &str,
    ) -> Result<Option<User>, AppError> {
        let login = normalize_login(login);
        require_credentials(&login, password)?;

        if let Some(existing) = self.users.find_user_by_login(&login).await? {
            if !existing.is_admin {
                warn!(
                    user_id = %existing.id,
                    "Bootstrap admin login belongs to a non-admin user; leaving it unchanged"
                );
            }
            return Ok(None);
        }

        self.policy.validate(password)?;
        let mut new_admin = NewUser::regular(login, self.hasher.hash(password)?);
        new_admin.is_admin = true;

        match self.users.create_user(&new_admin).await {
            Ok(user) => {
                info!(user_id = %user.id, login = %user.login, "Bootstrap admin created");
                Ok(Some(user))
            }
            // Another instance created it first.
            Err(e) if e.is(ErrorCode::UsernameTaken) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

fn require_credentials(login: &str, password: &str) -> Result<(), AppError> {
    if login.is_empty() {
        return Err(AppError::missing_field("user_name"));
    }
    if password.is_empty() {
        return Err(AppError::missing_field("user_pass"));
    }
    Ok(())
}

fn invalid_credentials() -> AppError {
    AppError::coded(
        ErrorCode::InvalidCredentials,
        "Invalid username or password",
    )
}
