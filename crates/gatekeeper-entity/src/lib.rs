//! # gatekeeper-entity
//!
//! Domain entity models shared by the store, auth, service and API layers.

pub mod service;
pub mod user;

pub use service::{NewService, Service, ServiceSummary, ServiceUpdate};
pub use user::{AccessList, MAX_LIFETIME_DAYS, NewUser, TokenLifetime, User, UserUpdate};
