//! Due-diligence report rows and the structured document stored inside them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::company::Branch;
use crate::models::intellectual_property::{Patent, Trademark};
use crate::models::registration::{FdaRegistration, NmpaRegistration};
use crate::models::risk::{AbnormalOperation, Litigation};

/// Report tiers, ordered from narrowest to widest data slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Basic,
    Standard,
    Comprehensive,
}

impl ReportType {
    pub const ALL: [ReportType; 3] = [
        ReportType::Basic,
        ReportType::Standard,
        ReportType::Comprehensive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Basic => "basic",
            ReportType::Standard => "standard",
            ReportType::Comprehensive => "comprehensive",
        }
    }

    pub fn parse(s: &str) -> Option<ReportType> {
        match s {
            "basic" => Some(ReportType::Basic),
            "standard" => Some(ReportType::Standard),
            "comprehensive" => Some(ReportType::Comprehensive),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated report as persisted. Rows are insert-only; regeneration
/// produces a new row rather than updating an old one.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct DueDiligenceReport {
    pub id: Uuid,
    pub company_id: Uuid,
    pub generated_by: Uuid,
    pub report_type: String,
    #[schema(value_type = Object)]
    pub report_data: serde_json::Value,
    pub is_downloadable: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl DueDiligenceReport {
    pub fn report_type(&self) -> Option<ReportType> {
        ReportType::parse(&self.report_type)
    }

    /// Expiry is strict: a report downloaded at exactly `expires_at` is
    /// still served.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Overall risk bands derived from the heuristic score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

/// Company identity and legal-standing fields embedded in a report.
/// Identity fields are always populated; the legal-standing block is added
/// at every viewable data level.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportCompany {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founding_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_representative: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered_capital: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegistrationSection {
    pub fda: Vec<FdaRegistration>,
    pub nmpa: Vec<NmpaRegistration>,
    /// Full count across both registers, not just the embedded sample.
    pub total_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IntellectualPropertySection {
    pub patents: Vec<Patent>,
    pub patent_count: i64,
    pub trademarks: Vec<Trademark>,
    pub trademark_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RiskAssessmentSection {
    pub risk_score: i32,
    pub risk_level: RiskLevel,
    pub risk_factors: Vec<String>,
    pub litigations: Vec<Litigation>,
    pub abnormal_operations: Vec<AbnormalOperation>,
}

/// The structured document serialized into `due_diligence_reports.report_data`.
/// Sections beyond the company block are present only when the tier that
/// produced the report includes them.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportData {
    pub company: ReportCompany,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrations: Option<RegistrationSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intellectual_property: Option<IntellectualPropertySection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_assessment: Option<RiskAssessmentSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branches: Option<Vec<Branch>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn report_type_round_trips_through_strings() {
        for rt in ReportType::ALL {
            assert_eq!(ReportType::parse(rt.as_str()), Some(rt));
        }
        assert_eq!(ReportType::parse("premium"), None);
        assert_eq!(ReportType::parse("Basic"), None);
    }

    #[test]
    fn report_types_order_by_breadth() {
        assert!(ReportType::Basic < ReportType::Standard);
        assert!(ReportType::Standard < ReportType::Comprehensive);
    }

    #[test]
    fn expiry_is_exclusive_of_the_deadline() {
        let now = Utc::now();
        let report = DueDiligenceReport {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            generated_by: Uuid::new_v4(),
            report_type: "standard".to_string(),
            report_data: serde_json::json!({}),
            is_downloadable: true,
            created_at: now - Duration::days(30),
            expires_at: now,
        };
        assert!(!report.is_expired_at(now));
        assert!(report.is_expired_at(now + Duration::seconds(1)));
    }

    #[test]
    fn basic_report_data_omits_gated_sections() {
        let data = ReportData {
            company: ReportCompany {
                id: Uuid::new_v4(),
                name: "杭州示例医疗科技有限公司".to_string(),
                name_en: Some("Hangzhou Example Medtech Co., Ltd.".to_string()),
                country: Some("China".to_string()),
                province: None,
                city: None,
                address: None,
                website: None,
                description: None,
                business_type: None,
                founding_year: Some(2011),
                employee_count: None,
                legal_representative: None,
                registered_capital: None,
                registration_number: None,
                business_status: None,
            },
            registrations: None,
            intellectual_property: None,
            risk_assessment: None,
            branches: None,
        };
        let json = serde_json::to_value(&data).unwrap();
        assert!(json.get("registrations").is_none());
        assert!(json.get("risk_assessment").is_none());
        assert!(json.get("branches").is_none());
        assert_eq!(json["company"]["founding_year"], 2011);
    }
}
