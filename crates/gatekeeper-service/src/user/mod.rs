//! Privileged user management.

pub mod admin;

pub use admin::{AdminDirectory, CreateUserRequest, UpdateUserRequest};
