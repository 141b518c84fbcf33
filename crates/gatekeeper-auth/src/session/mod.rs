//! Session flows: registration, login, refresh and logout.

pub mod manager;

pub use manager::{AuthSessionManager, LoginResult, normalize_login};
