//! # gatekeeper-service
//!
//! Use cases layered over the stores. Services follow constructor injection:
//! all dependencies are provided at construction time as `Arc` references.
//! Privileged operations take an [`AdminIdentity`](gatekeeper_auth::AdminIdentity)
//! as proof that the gateway checked the caller.

pub mod registry;
pub mod user;

pub use registry::{CreateServiceRequest, ServiceRegistry};
pub use user::{AdminDirectory, CreateUserRequest, UpdateUserRequest};
