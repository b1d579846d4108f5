//! Company aggregate root.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Company master record.
///
/// Names are bilingual: `name` carries the registered (usually Chinese) name,
/// `name_en` the English trade name where one exists. All non-identity
/// columns are nullable in the upstream data and modeled as `Option`.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub name_en: Option<String>,
    pub country: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub business_type: Option<String>,
    pub founding_year: Option<i32>,
    pub employee_count: Option<i32>,
    pub legal_representative: Option<String>,
    pub registered_capital: Option<String>,
    pub registration_number: Option<String>,
    pub business_status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Branch office of a company.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Branch {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub status: Option<String>,
}
