//! Append-only access log for generated reports.
//!
//! Every successful view (generation) and download appends one row. Rows
//! are never updated or deleted by the application.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessType {
    View,
    Download,
}

impl AccessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessType::View => "view",
            AccessType::Download => "download",
        }
    }
}

pub struct AccessLogService {
    db: PgPool,
}

impl AccessLogService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn log(
        &self,
        report_id: Uuid,
        user_id: Uuid,
        access_type: AccessType,
    ) -> Result<Uuid> {
        sqlx::query_scalar(
            r#"
            INSERT INTO report_access_log (report_id, user_id, access_type)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(report_id)
        .bind(user_id)
        .bind(access_type.as_str())
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }
}
