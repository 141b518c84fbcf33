//! First-run bootstrap configuration.

use serde::{Deserialize, Serialize};

/// Administrator account created at start-up when no user with that login
/// exists yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Login of the administrator to seed.
    #[serde(default)]
    pub admin_login: Option<String>,
    /// Initial password of the seeded administrator.
    #[serde(default)]
    pub admin_password: Option<String>,
}

impl BootstrapConfig {
    /// Returns the credentials when both halves are configured.
    pub fn admin_credentials(&self) -> Option<(&str, &str)> {
        match (&self.admin_login, &self.admin_password) {
            (Some(login), Some(password)) => Some((login.as_str(), password.as_str())),
            _ => None,
        }
    }
}
