//! Regulatory registration records, typed per agency.
//!
//! FDA and NMPA registrations carry different fields, so each source gets its
//! own record type instead of a duck-typed shared shape.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// FDA device listing / 510(k) clearance record.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct FdaRegistration {
    pub id: Uuid,
    pub company_id: Uuid,
    pub registration_number: String,
    pub device_name: String,
    pub device_class: Option<String>,
    pub product_code: Option<String>,
    pub regulation_number: Option<String>,
    pub status: Option<String>,
    pub cleared_at: Option<NaiveDate>,
}

/// NMPA medical-device registration certificate.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct NmpaRegistration {
    pub id: Uuid,
    pub company_id: Uuid,
    pub registration_number: String,
    pub product_name: String,
    pub product_name_en: Option<String>,
    pub management_class: Option<String>,
    pub status: Option<String>,
    pub approved_at: Option<NaiveDate>,
    pub expires_at: Option<NaiveDate>,
}
