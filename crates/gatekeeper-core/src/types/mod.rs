//! Core type definitions used across the Gatekeeper workspace.

pub mod id;

pub use id::*;
