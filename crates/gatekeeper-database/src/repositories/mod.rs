//! PostgreSQL implementations of the store traits.

pub mod service;
pub mod user;

pub use service::ServiceRepository;
pub use user::UserRepository;

/// Name of the unique constraint on `usr_info.usr_login`.
pub(crate) const LOGIN_UNIQUE_CONSTRAINT: &str = "usr_info_usr_login_key";
