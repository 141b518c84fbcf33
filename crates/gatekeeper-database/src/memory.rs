//! In-process store implementation.
//!
//! Holds users and services behind a single [`RwLock`], so every operation
//! (including the read-modify-write of a grant) is serialized the same way a
//! row lock would serialize it in PostgreSQL. Used by tests and by local runs
//! without a database.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use gatekeeper_core::error::{AppError, ErrorCode};
use gatekeeper_core::result::AppResult;
use gatekeeper_core::types::{ServiceId, UserId};
use gatekeeper_entity::{
    AccessList, NewService, NewUser, Service, ServiceSummary, ServiceUpdate, User, UserUpdate,
};

use crate::store::{ServiceStore, StoreHealth, UserStore};

#[derive(Debug, Default)]
struct MemoryState {
    users: BTreeMap<UserId, User>,
    services: BTreeMap<ServiceId, Service>,
    last_user_id: i64,
    last_service_id: i64,
}

/// A [`UserStore`] + [`ServiceStore`] kept entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    /// Create an empty store. Ids start at 1, like `BIGSERIAL`.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

fn nothing_to_update() -> AppError {
    AppError::coded(ErrorCode::NothingToUpdate, "No fields to update")
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_login(&self, login: &str) -> AppResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.login == login).cloned())
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(self.state.read().await.users.values().cloned().collect())
    }

    async fn create_user(&self, data: &NewUser) -> AppResult<User> {
        let mut state = self.state.write().await;
        if state.users.values().any(|u| u.login == data.login) {
            return Err(AppError::username_taken(&data.login));
        }

        state.last_user_id += 1;
        let user = User {
            id: UserId(state.last_user_id),
            login: data.login.clone(),
            password_hash: data.password_hash.clone(),
            is_admin: data.is_admin,
            access_list: data.access_list.clone(),
            created_at: Utc::now(),
            token_lifetime: data.token_lifetime,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: UserId, data: &UserUpdate) -> AppResult<User> {
        if data.is_empty() {
            return Err(nothing_to_update());
        }
        let mut state = self.state.write().await;
        let user = state
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::user_not_found(id))?;
        data.apply_to(user);
        Ok(user.clone())
    }

    async fn delete_user(&self, id: UserId) -> AppResult<bool> {
        Ok(self.state.write().await.users.remove(&id).is_some())
    }

    async fn grant_access(&self, id: UserId, service_id: ServiceId) -> AppResult<AccessList> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::user_not_found(id))?;
        user.access_list.add(service_id);
        Ok(user.access_list.clone())
    }
}

#[async_trait]
impl ServiceStore for MemoryStore {
    async fn find_service(&self, id: ServiceId) -> AppResult<Option<Service>> {
        Ok(self.state.read().await.services.get(&id).cloned())
    }

    async fn list_service_summaries(&self) -> AppResult<Vec<ServiceSummary>> {
        let state = self.state.read().await;
        let mut summaries: Vec<ServiceSummary> =
            state.services.values().map(Service::summary).collect();
        summaries.sort_by(|a, b| a.srv_name.cmp(&b.srv_name).then(a.srv_id.cmp(&b.srv_id)));
        Ok(summaries)
    }

    async fn list_services_in(&self, access: &AccessList) -> AppResult<Vec<Service>> {
        let state = self.state.read().await;
        let mut services: Vec<Service> = access
            .iter()
            .filter_map(|id| state.services.get(&id).cloned())
            .collect();
        services.sort_by(|a, b| a.srv_name.cmp(&b.srv_name).then(a.srv_id.cmp(&b.srv_id)));
        Ok(services)
    }

    async fn create_service_for(&self, data: &NewService, owner: UserId) -> AppResult<Service> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&owner) {
            return Err(AppError::user_not_found(owner));
        }

        state.last_service_id += 1;
        let service = Service {
            srv_id: ServiceId(state.last_service_id),
            srv_name: data.name.clone(),
            srv_desc: data.description.clone(),
            srv_image: data.image.clone(),
            srv_ip: data.ip_address.clone(),
        };
        state.services.insert(service.srv_id, service.clone());
        if let Some(user) = state.users.get_mut(&owner) {
            user.access_list.add(service.srv_id);
        }
        Ok(service)
    }

    async fn update_service(&self, id: ServiceId, data: &ServiceUpdate) -> AppResult<Service> {
        if data.is_empty() {
            return Err(nothing_to_update());
        }
        let mut state = self.state.write().await;
        let service = state
            .services
            .get_mut(&id)
            .ok_or_else(|| AppError::service_not_found(id))?;
        data.apply_to(service);
        Ok(service.clone())
    }

    async fn delete_service(&self, id: ServiceId) -> AppResult<bool> {
        Ok(self.state.write().await.services.remove(&id).is_some())
    }
}
