//! Litigation and abnormal-operation records used for risk assessment.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Litigation {
    pub id: Uuid,
    pub company_id: Uuid,
    pub case_number: String,
    pub case_type: Option<String>,
    pub plaintiff: Option<String>,
    pub defendant: Option<String>,
    pub court: Option<String>,
    pub status: Option<String>,
    pub filed_at: Option<NaiveDate>,
}

/// A listing on an operational irregularity register, e.g. unreachable at the
/// registered address or failure to file annual disclosures.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct AbnormalOperation {
    pub id: Uuid,
    pub company_id: Uuid,
    pub reason: String,
    pub authority: Option<String>,
    pub listed_at: Option<NaiveDate>,
    pub removed_at: Option<NaiveDate>,
}
