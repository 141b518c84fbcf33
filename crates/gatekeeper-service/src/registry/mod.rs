//! The service catalogue.

pub mod service;

pub use service::{CreateServiceRequest, ServiceRegistry};
