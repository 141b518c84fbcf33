//! Store traits: the CRUD interface the core programs against.
//!
//! Every implementation must uphold the same contracts, so the PostgreSQL
//! repositories and the [`MemoryStore`](crate::MemoryStore) are
//! interchangeable behind `Arc<dyn UserStore>` / `Arc<dyn ServiceStore>`.

use async_trait::async_trait;

use gatekeeper_core::result::AppResult;
use gatekeeper_core::types::{ServiceId, UserId};
use gatekeeper_entity::{
    AccessList, NewService, NewUser, Service, ServiceSummary, ServiceUpdate, User, UserUpdate,
};

/// Persistence of user records.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Look a user up by primary key.
    async fn find_user(&self, id: UserId) -> AppResult<Option<User>>;

    /// Look a user up by (already normalized) login.
    async fn find_user_by_login(&self, login: &str) -> AppResult<Option<User>>;

    /// All users ordered by id.
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Insert a user. Fails with `UsernameTaken` if the login exists.
    async fn create_user(&self, data: &NewUser) -> AppResult<User>;

    /// Apply a partial update. Fails with `UserNotFound` if absent.
    async fn update_user(&self, id: UserId, data: &UserUpdate) -> AppResult<User>;

    /// Delete a user. Returns `false` if no such user existed.
    async fn delete_user(&self, id: UserId) -> AppResult<bool>;

    /// Append a service to a user's access list atomically and return the
    /// resulting list. Idempotent. Fails with `UserNotFound` if absent.
    async fn grant_access(&self, id: UserId, service_id: ServiceId) -> AppResult<AccessList>;
}

/// Persistence of the service registry.
#[async_trait]
pub trait ServiceStore: Send + Sync + std::fmt::Debug + 'static {
    /// Look a service up by primary key.
    async fn find_service(&self, id: ServiceId) -> AppResult<Option<Service>>;

    /// Id, name and description of every service, ordered by name.
    async fn list_service_summaries(&self) -> AppResult<Vec<ServiceSummary>>;

    /// Services whose ids are in `access`, ordered by name.
    async fn list_services_in(&self, access: &AccessList) -> AppResult<Vec<Service>>;

    /// Insert a service and grant it to `owner` in one transaction.
    /// Nothing is persisted if the owner does not exist.
    async fn create_service_for(&self, data: &NewService, owner: UserId) -> AppResult<Service>;

    /// Apply a partial update. Fails with `ServiceNotFound` if absent.
    async fn update_service(&self, id: ServiceId, data: &ServiceUpdate) -> AppResult<Service>;

    /// Delete a service. Returns `false` if no such service existed.
    async fn delete_service(&self, id: ServiceId) -> AppResult<bool>;
}

/// Liveness of the backing store, reported by `GET /health`.
#[async_trait]
pub trait StoreHealth: Send + Sync + std::fmt::Debug + 'static {
    /// Round-trip to the store. Fails if it cannot serve queries.
    async fn ping(&self) -> AppResult<()>;
}
