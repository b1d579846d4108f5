//! Patent and trademark records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Patent {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub patent_number: String,
    pub patent_type: Option<String>,
    pub status: Option<String>,
    pub filed_at: Option<NaiveDate>,
    pub granted_at: Option<NaiveDate>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Trademark {
    pub id: Uuid,
    pub company_id: Uuid,
    pub mark_name: String,
    pub registration_number: String,
    pub intl_class: Option<String>,
    pub status: Option<String>,
    pub registered_at: Option<NaiveDate>,
}
