//! Service catalogue: listing, creation with owner grant, admin edits.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use gatekeeper_auth::{AdminIdentity, Identity};
use gatekeeper_core::error::{AppError, ErrorCode};
use gatekeeper_core::types::ServiceId;
use gatekeeper_database::{ServiceStore, UserStore};
use gatekeeper_entity::{NewService, Service, ServiceUpdate};

/// Request to register a service. Every field is required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateServiceRequest {
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Image reference.
    pub image: String,
    /// Network address.
    pub ip_address: String,
}

/// Operations over the service registry.
#[derive(Debug, Clone)]
pub struct ServiceRegistry {
    users: Arc<dyn UserStore>,
    services: Arc<dyn ServiceStore>,
}

impl ServiceRegistry {
    /// Creates a new registry.
    pub fn new(users: Arc<dyn UserStore>, services: Arc<dyn ServiceStore>) -> Self {
        Self { users, services }
    }

    /// Services in the caller's access list, by name.
    pub async fn list_for_user(&self, caller: &Identity) -> Result<Vec<Service>, AppError> {
        let user = self
            .users
            .find_user(caller.user_id)
            .await?
            .ok_or_else(|| AppError::coded(ErrorCode::UnknownUser, "User not found"))?;
        self.services.list_services_in(&user.access_list).await
    }

    /// Registers a service and grants it to the caller in one transaction.
    pub async fn create_service(
        &self,
        caller: &Identity,
        req: CreateServiceRequest,
    ) -> Result<Service, AppError> {
        let data = NewService {
            name: required(req.name, "srv_name")?,
            description: required(req.description, "srv_desc")?,
            image: required(req.image, "srv_image")?,
            ip_address: required(req.ip_address, "srv_ip")?,
        };

        let service = self
            .services
            .create_service_for(&data, caller.user_id)
            .await?;

        info!(
            user_id = %caller.user_id,
            service_id = %service.srv_id,
            name = %service.srv_name,
            "Service created and granted to creator"
        );
        Ok(service)
    }

    /// Applies a partial update to a service.
    pub async fn update_service(
        &self,
        admin: &AdminIdentity,
        id: ServiceId,
        update: ServiceUpdate,
    ) -> Result<Service, AppError> {
        if update.is_empty() {
            return Err(AppError::coded(
                ErrorCode::NothingToUpdate,
                "No fields to update",
            ));
        }
        let update = ServiceUpdate {
            name: optional(update.name, "srv_name")?,
            description: optional(update.description, "srv_desc")?,
            image: optional(update.image, "srv_image")?,
            ip_address: optional(update.ip_address, "srv_ip")?,
        };

        let service = self.services.update_service(id, &update).await?;
        info!(admin_id = %admin.user_id(), service_id = %id, "Service updated");
        Ok(service)
    }

    /// Removes a service. Grants that reference it are left in place and
    /// match nothing.
    pub async fn delete_service(
        &self,
        admin: &AdminIdentity,
        id: ServiceId,
    ) -> Result<(), AppError> {
        if !self.services.delete_service(id).await? {
            return Err(AppError::service_not_found(id));
        }
        info!(admin_id = %admin.user_id(), service_id = %id, "Service deleted");
        Ok(())
    }
}

fn required(value: String, field: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::missing_field(field));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<String>, field: &str) -> Result<Option<String>, AppError> {
    value.map(|v| required(v, field)).transpose()
}
