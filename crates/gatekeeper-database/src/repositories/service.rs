//! Service registry repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use gatekeeper_core::error::{AppError, ErrorCode, ErrorKind};
use gatekeeper_core::result::AppResult;
use gatekeeper_core::types::{ServiceId, UserId};
use gatekeeper_entity::{AccessList, NewService, Service, ServiceSummary, ServiceUpdate};

use super::user::append_grant;
use crate::store::ServiceStore;

/// Repository for `services_info` CRUD.
#[derive(Debug, Clone)]
pub struct ServiceRepository {
    pool: PgPool,
}

impl ServiceRepository {
    /// Create a new service repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceStore for ServiceRepository {
    async fn find_service(&self, id: ServiceId) -> AppResult<Option<Service>> {
        sqlx::query_as::<_, Service>("SELECT * FROM services_info WHERE srv_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find service", e))
    }

    async fn list_service_summaries(&self) -> AppResult<Vec<ServiceSummary>> {
        sqlx::query_as::<_, ServiceSummary>(
            "SELECT srv_id, srv_name, srv_desc FROM services_info ORDER BY srv_name, srv_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list services", e))
    }

    async fn list_services_in(&self, access: &AccessList) -> AppResult<Vec<Service>> {
        if access.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, Service>(
            "SELECT * FROM services_info WHERE srv_id = ANY($1) ORDER BY srv_name, srv_id",
        )
        .bind(access.to_i64_vec())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list granted services", e)
        })
    }

    async fn create_service_for(&self, data: &NewService, owner: UserId) -> AppResult<Service> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let service = sqlx::query_as::<_, Service>(
            r#"INSERT INTO services_info (srv_name, srv_desc, srv_image, srv_ip)
            VALUES ($1, $2, $3, $4)
            RETURNING *"#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.image)
        .bind(&data.ip_address)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create service", e))?;

        // An error here drops `tx`, which rolls the insert back.
        append_grant(&mut *tx, owner, service.srv_id).await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit service creation", e)
        })?;
        Ok(service)
    }

    async fn update_service(&self, id: ServiceId, data: &ServiceUpdate) -> AppResult<Service> {
        if data.is_empty() {
            return Err(AppError::coded(
                ErrorCode::NothingToUpdate,
                "No fields to update",
            ));
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE services_info SET ");
        {
            let mut fields = builder.separated(", ");
            if let Some(name) = &data.name {
                fields.push("srv_name = ").push_bind_unseparated(name.clone());
            }
            if let Some(description) = &data.description {
                fields
                    .push("srv_desc = ")
                    .push_bind_unseparated(description.clone());
            }
            if let Some(image) = &data.image {
                fields.push("srv_image = ").push_bind_unseparated(image.clone());
            }
            if let Some(ip) = &data.ip_address {
                fields.push("srv_ip = ").push_bind_unseparated(ip.clone());
            }
        }
        builder.push(" WHERE srv_id = ").push_bind(id);
        builder.push(" RETURNING *");

        builder
            .build_query_as::<Service>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update service", e))?
            .ok_or_else(|| AppError::service_not_found(id))
    }

    async fn delete_service(&self, id: ServiceId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM services_info WHERE srv_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete service", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
