//! User repository implementation.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use gatekeeper_core::error::{AppError, ErrorCode, ErrorKind};
use gatekeeper_core::result::AppResult;
use gatekeeper_core::types::{ServiceId, UserId};
use gatekeeper_entity::{AccessList, NewUser, User, UserUpdate};

use super::LOGIN_UNIQUE_CONSTRAINT;
use crate::store::UserStore;

/// Repository for `usr_info` CRUD.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_user(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM usr_info WHERE usr_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_user_by_login(&self, login: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM usr_info WHERE usr_login = $1")
            .bind(login)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by login", e)
            })
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM usr_info ORDER BY usr_id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }

    async fn create_user(&self, data: &NewUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"INSERT INTO usr_info (usr_login, usr_password, usr_admin, usr_access, jwt_expiration)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *"#,
        )
        .bind(&data.login)
        .bind(&data.password_hash)
        .bind(data.is_admin)
        .bind(&data.access_list)
        .bind(data.token_lifetime)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some(LOGIN_UNIQUE_CONSTRAINT) =>
            {
                AppError::username_taken(&data.login)
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    async fn update_user(&self, id: UserId, data: &UserUpdate) -> AppResult<User> {
        if data.is_empty() {
            return Err(AppError::coded(
                ErrorCode::NothingToUpdate,
                "No fields to update",
            ));
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE usr_info SET ");
        {
            let mut fields = builder.separated(", ");
            if let Some(hash) = &data.password_hash {
                fields.push("usr_password = ").push_bind_unseparated(hash.clone());
            }
            if let Some(is_admin) = data.is_admin {
                fields.push("usr_admin = ").push_bind_unseparated(is_admin);
            }
            if let Some(access_list) = &data.access_list {
                fields
                    .push("usr_access = ")
                    .push_bind_unseparated(access_list.clone());
            }
            if let Some(lifetime) = data.token_lifetime {
                fields.push("jwt_expiration = ").push_bind_unseparated(lifetime);
            }
        }
        builder.push(" WHERE usr_id = ").push_bind(id);
        builder.push(" RETURNING *");

        builder
            .build_query_as::<User>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update user", e))?
            .ok_or_else(|| AppError::user_not_found(id))
    }

    async fn delete_user(&self, id: UserId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM usr_info WHERE usr_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn grant_access(&self, id: UserId, service_id: ServiceId) -> AppResult<AccessList> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let access = append_grant(&mut *tx, id, service_id).await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit access grant", e)
        })?;
        Ok(access)
    }
}

/// Lock the user's row, add `service_id` to its access list and write it
/// back. Must run inside a transaction; the row lock is held until it ends.
pub(crate) async fn append_grant(
    conn: &mut PgConnection,
    id: UserId,
    service_id: ServiceId,
) -> AppResult<AccessList> {
    let mut access = sqlx::query_scalar::<_, AccessList>(
        "SELECT usr_access FROM usr_info WHERE usr_id = $1 FOR UPDATE",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock access list", e))?
    .ok_or_else(|| AppError::user_not_found(id))?;

    if access.add(service_id) {
        sqlx::query("UPDATE usr_info SET usr_access = $1 WHERE usr_id = $2")
            .bind(&access)
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to write access list", e)
            })?;
    }
    Ok(access)
}
