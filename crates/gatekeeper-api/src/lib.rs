//! # gatekeeper-api
//!
//! HTTP API layer for Gatekeeper built on Axum.
//!
//! A thin adapter over the auth and service crates: route table, request
//! extractors, DTOs matching the wire format, session cookies, error
//! mapping, and the logging/CORS middleware stack.

pub mod app;
pub mod cookies;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
