//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Token, password-policy and session-cookie configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for token signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token lifetime in days for users without an override.
    #[serde(default = "default_access_days")]
    pub access_token_days: u32,
    /// Refresh token lifetime in days.
    #[serde(default = "default_refresh_days")]
    pub refresh_token_days: u32,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Name of the session cookie carrying the access token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Whether the session cookie is marked `Secure`.
    #[serde(default)]
    pub cookie_secure: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            access_token_days: default_access_days(),
            refresh_token_days: default_refresh_days(),
            password_min_length: default_password_min(),
            cookie_name: default_cookie_name(),
            cookie_secure: false,
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_days() -> u32 {
    1
}

fn default_refresh_days() -> u32 {
    90
}

fn default_password_min() -> usize {
    6
}

fn default_cookie_name() -> String {
    "token".to_string()
}
