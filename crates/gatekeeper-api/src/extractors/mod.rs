//! Custom Axum extractors.

pub mod auth;
pub mod json;
pub mod service;

pub use auth::{AdminUser, AuthUser};
pub use json::ValidatedJson;
pub use service::{SERVICE_ID_HEADER, ServiceTarget};
