//! Service registry entity models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use gatekeeper_core::types::ServiceId;

/// A backend service reachable through the gateway (`services_info` row).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Service {
    /// Unique service identifier.
    pub srv_id: ServiceId,
    /// Display name.
    pub srv_name: String,
    /// Free-form description.
    pub srv_desc: String,
    /// Image reference (URL or storage key); the bytes live elsewhere.
    pub srv_image: String,
    /// Network address of the service.
    pub srv_ip: String,
}

impl Service {
    /// The admin listing projection.
    pub fn summary(&self) -> ServiceSummary {
        ServiceSummary {
            srv_id: self.srv_id,
            srv_name: self.srv_name.clone(),
            srv_desc: self.srv_desc.clone(),
        }
    }
}

/// Read-only projection used by the admin service listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ServiceSummary {
    /// Service identifier.
    pub srv_id: ServiceId,
    /// Display name.
    pub srv_name: String,
    /// Description.
    pub srv_desc: String,
}

/// Data required to register a service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewService {
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Image reference.
    pub image: String,
    /// Network address.
    pub ip_address: String,
}

/// Partial update of a service; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New image reference.
    pub image: Option<String>,
    /// New network address.
    pub ip_address: Option<String>,
}

impl ServiceUpdate {
    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.ip_address.is_none()
    }

    /// Applies the set fields to an in-memory service.
    pub fn apply_to(&self, service: &mut Service) {
        if let Some(name) = &self.name {
            service.srv_name = name.clone();
        }
        if let Some(description) = &self.description {
            service.srv_desc = description.clone();
        }
        if let Some(image) = &self.image {
            service.srv_image = image.clone();
        }
        if let Some(ip) = &self.ip_address {
            service.srv_ip = ip.clone();
        }
    }
}
