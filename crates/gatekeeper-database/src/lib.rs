//! # gatekeeper-database
//!
//! Persistence for Gatekeeper. The [`store`] traits are the CRUD interface
//! the rest of the workspace programs against; [`repositories`] implements
//! them over PostgreSQL and [`memory`] implements them in process.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use repositories::{ServiceRepository, UserRepository};
pub use store::{ServiceStore, StoreHealth, UserStore};
