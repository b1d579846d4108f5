//! Permission table lookups.
//!
//! The permissions table maps (role, resource, action) to an allowed flag
//! and is maintained outside this service. Lookups that match no row deny.

use sqlx::PgPool;

use crate::error::{AppError, Result};
use crate::models::profile::Role;

pub struct PermissionService {
    db: PgPool,
}

impl PermissionService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Whether `role` may perform `action` on `resource`. Missing rows deny.
    pub async fn is_allowed(&self, role: Role, resource: &str, action: &str) -> Result<bool> {
        let allowed: Option<bool> = sqlx::query_scalar(
            r#"
            SELECT allowed
            FROM permissions
            WHERE role = $1 AND resource = $2 AND action = $3
            "#,
        )
        .bind(role.as_str())
        .bind(resource)
        .bind(action)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(allowed.unwrap_or(false))
    }
}
