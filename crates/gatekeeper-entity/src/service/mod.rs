//! Service registry entities.

pub mod model;

pub use model::{NewService, Service, ServiceSummary, ServiceUpdate};
