//! Admin-only handlers. Every handler takes an [`AdminUser`](crate::extractors::AdminUser).

pub mod services;
pub mod users;
