//! Role lookup backed by the profiles table.
//!
//! The effective role is read from the database on every request rather
//! than cached or taken from token claims, so a tier change applies to the
//! very next call.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::profile::{Profile, Role};

pub struct RoleService {
    db: PgPool,
}

impl RoleService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Effective role for a user. A verified session with no profile row
    /// behaves as a guest.
    pub async fn get_role(&self, user_id: Uuid) -> Result<Role> {
        let role: Option<String> =
            sqlx::query_scalar("SELECT role FROM profiles WHERE id = $1")
                .bind(user_id)
                .fetch_optional(&self.db)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(role
            .and_then(|r| Role::parse(&r))
            .unwrap_or(Role::Guest))
    }

    pub async fn get_profile(&self, user_id: Uuid) -> Result<Profile> {
        sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, email, display_name, role, created_at, updated_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
    }
}
