//! Due-diligence report generation, history and download preparation.
//!
//! Generation is all-or-nothing: every sub-fetch must succeed before the
//! single insert runs, so a failure mid-assembly leaves no partial rows.
//! Reports are never updated after insert; regeneration creates a new row.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::company::Company;
use crate::models::report::{
    DueDiligenceReport, IntellectualPropertySection, RegistrationSection, ReportCompany,
    ReportData, ReportType, RiskAssessmentSection, RiskLevel,
};
use crate::models::risk::{AbnormalOperation, Litigation};
use crate::services::access_log_service::{AccessLogService, AccessType};
use crate::services::access_policy::{self, DataLevel};
use crate::services::company_service::CompanyService;
use crate::services::report_render;
use crate::services::role_service::RoleService;

/// Reports expire 30 days after generation. Expiry is soft: nothing deletes
/// the row, downloads past the deadline are refused.
pub const REPORT_TTL_DAYS: i32 = 30;

/// History queries return at most this many reports.
pub const HISTORY_LIMIT: i64 = 10;

/// Registration rows embedded per register; full counts ride alongside.
const REGISTRATION_SAMPLE_LIMIT: i64 = 10;

/// Patent and trademark rows embedded per kind.
const IP_SAMPLE_LIMIT: i64 = 20;

const REPORT_COLUMNS: &str = r#"
    id, company_id, generated_by, report_type, report_data,
    is_downloadable, created_at, expires_at
"#;

/// A rendered report ready to be served as an attachment.
#[derive(Debug)]
pub struct ReportDownload {
    pub filename: String,
    pub markdown: String,
}

pub struct ReportService {
    db: PgPool,
}

impl ReportService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Generate and persist a report for the requesting user.
    ///
    /// Access is resolved before the company is loaded, so a caller without
    /// view rights learns nothing about which companies exist.
    pub async fn generate(
        &self,
        company_id: Uuid,
        report_type: ReportType,
        user_id: Uuid,
    ) -> Result<DueDiligenceReport> {
        let role = RoleService::new(self.db.clone()).get_role(user_id).await?;
        let decision = access_policy::resolve_access(role, report_type);
        if !decision.can_view {
            return Err(AppError::InsufficientPermissions(format!(
                "Role '{}' may not view {} reports",
                role.as_str(),
                report_type
            )));
        }

        let companies = CompanyService::new(self.db.clone());
        let company = companies.get_company(company_id).await?;
        let data = self
            .assemble(&companies, &company, decision.data_level)
            .await?;

        let report = self
            .insert(
                company_id,
                user_id,
                report_type,
                &data,
                decision.can_download,
            )
            .await?;

        AccessLogService::new(self.db.clone())
            .log(report.id, user_id, AccessType::View)
            .await?;

        tracing::info!(
            report_id = %report.id,
            company_id = %company_id,
            report_type = %report_type,
            role = role.as_str(),
            "Generated due-diligence report"
        );

        Ok(report)
    }

    /// Fetch one of the caller's own reports. Reports generated by other
    /// users are indistinguishable from missing ones.
    pub async fn get(&self, report_id: Uuid, user_id: Uuid) -> Result<DueDiligenceReport> {
        sqlx::query_as::<_, DueDiligenceReport>(&format!(
            r#"
            SELECT {REPORT_COLUMNS}
            FROM due_diligence_reports
            WHERE id = $1 AND generated_by = $2
            "#
        ))
        .bind(report_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Report not found".to_string()))
    }

    /// The caller's most recent reports for a company, newest first.
    pub async fn list_history(
        &self,
        company_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<DueDiligenceReport>> {
        sqlx::query_as::<_, DueDiligenceReport>(&format!(
            r#"
            SELECT {REPORT_COLUMNS}
            FROM due_diligence_reports
            WHERE company_id = $1 AND generated_by = $2
            ORDER BY created_at DESC
            LIMIT $3
            "#
        ))
        .bind(company_id)
        .bind(user_id)
        .bind(HISTORY_LIMIT)
        .fetch_all(&self.db)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Render one of the caller's reports for download and log the access.
    pub async fn prepare_download(
        &self,
        report_id: Uuid,
        user_id: Uuid,
    ) -> Result<ReportDownload> {
        let report = self.get(report_id, user_id).await?;

        if !report.is_downloadable {
            return Err(AppError::Forbidden(
                "This report cannot be downloaded at your tier; upgrade to VIP for downloads"
                    .to_string(),
            ));
        }
        if report.is_expired_at(Utc::now()) {
            return Err(AppError::Expired(
                "This report has expired; generate a new one".to_string(),
            ));
        }

        let data: ReportData = serde_json::from_value(report.report_data.clone())
            .map_err(|e| AppError::Internal(format!("Stored report data is unreadable: {}", e)))?;

        let markdown = report_render::render_markdown(&report, &data);
        let filename =
            report_render::suggested_filename(&data.company, Utc::now().date_naive());

        AccessLogService::new(self.db.clone())
            .log(report.id, user_id, AccessType::Download)
            .await?;

        tracing::info!(report_id = %report.id, filename = %filename, "Prepared report download");

        Ok(ReportDownload { filename, markdown })
    }

    /// Build the report document for a data level. Each level is spelled out
    /// separately; what a tier contains is decided here and nowhere else.
    async fn assemble(
        &self,
        companies: &CompanyService,
        company: &Company,
        data_level: DataLevel,
    ) -> Result<ReportData> {
        let mut data = ReportData {
            company: identity_section(company),
            registrations: None,
            intellectual_property: None,
            risk_assessment: None,
            branches: None,
        };

        match data_level {
            // resolve_access only admits viewable levels; this arm guards
            // against a future caller bypassing it.
            DataLevel::None => {
                return Err(AppError::InsufficientPermissions(
                    "No report content available at this access level".to_string(),
                ));
            }
            DataLevel::Basic => {
                apply_legal_fields(&mut data.company, company);
            }
            DataLevel::Standard => {
                apply_legal_fields(&mut data.company, company);
                data.registrations = Some(self.fetch_registrations(companies, company.id).await?);
                data.intellectual_property =
                    Some(self.fetch_intellectual_property(companies, company.id).await?);
            }
            DataLevel::Full => {
                apply_legal_fields(&mut data.company, company);
                data.registrations = Some(self.fetch_registrations(companies, company.id).await?);
                data.intellectual_property =
                    Some(self.fetch_intellectual_property(companies, company.id).await?);

                let litigations = companies.list_litigations(company.id).await?;
                let abnormal_operations = companies.list_abnormal_operations(company.id).await?;
                data.risk_assessment =
                    Some(build_risk_assessment(litigations, abnormal_operations));
                data.branches = Some(companies.list_branches(company.id).await?);
            }
        }

        Ok(data)
    }

    async fn fetch_registrations(
        &self,
        companies: &CompanyService,
        company_id: Uuid,
    ) -> Result<RegistrationSection> {
        let fda = companies
            .list_fda_registrations(company_id, REGISTRATION_SAMPLE_LIMIT)
            .await?;
        let nmpa = companies
            .list_nmpa_registrations(company_id, REGISTRATION_SAMPLE_LIMIT)
            .await?;
        let total_count = companies.count_fda_registrations(company_id).await?
            + companies.count_nmpa_registrations(company_id).await?;

        Ok(RegistrationSection {
            fda,
            nmpa,
            total_count,
        })
    }

    async fn fetch_intellectual_property(
        &self,
        companies: &CompanyService,
        company_id: Uuid,
    ) -> Result<IntellectualPropertySection> {
        let patents = companies.list_patents(company_id, IP_SAMPLE_LIMIT).await?;
        let patent_count = companies.count_patents(company_id).await?;
        let trademarks = companies
            .list_trademarks(company_id, IP_SAMPLE_LIMIT)
            .await?;
        let trademark_count = companies.count_trademarks(company_id).await?;

        Ok(IntellectualPropertySection {
            patents,
            patent_count,
            trademarks,
            trademark_count,
        })
    }

    /// Insert as the final step of generation. `created_at` and `expires_at`
    /// come from the same statement clock, keeping the 30-day window exact.
    async fn insert(
        &self,
        company_id: Uuid,
        user_id: Uuid,
        report_type: ReportType,
        data: &ReportData,
        is_downloadable: bool,
    ) -> Result<DueDiligenceReport> {
        let report_data = serde_json::to_value(data)
            .map_err(|e| AppError::Internal(format!("Failed to serialize report data: {}", e)))?;

        sqlx::query_as::<_, DueDiligenceReport>(&format!(
            r#"
            INSERT INTO due_diligence_reports
                (company_id, generated_by, report_type, report_data,
                 is_downloadable, created_at, expires_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW() + make_interval(days => $6))
            RETURNING {REPORT_COLUMNS}
            "#
        ))
        .bind(company_id)
        .bind(user_id)
        .bind(report_type.as_str())
        .bind(report_data)
        .bind(is_downloadable)
        .bind(REPORT_TTL_DAYS)
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }
}

fn identity_section(company: &Company) -> ReportCompany {
    ReportCompany {
        id: company.id,
        name: company.name.clone(),
        name_en: company.name_en.clone(),
        country: company.country.clone(),
        province: company.province.clone(),
        city: company.city.clone(),
        address: company.address.clone(),
        website: company.website.clone(),
        description: company.description.clone(),
        business_type: company.business_type.clone(),
        founding_year: company.founding_year,
        employee_count: company.employee_count,
        legal_representative: None,
        registered_capital: None,
        registration_number: None,
        business_status: None,
    }
}

fn apply_legal_fields(target: &mut ReportCompany, company: &Company) {
    target.legal_representative = company.legal_representative.clone();
    target.registered_capital = company.registered_capital.clone();
    target.registration_number = company.registration_number.clone();
    target.business_status = company.business_status.clone();
}

/// Heuristic scoring: 15 points per litigation, 10 per abnormal-operation
/// record, capped at 100. Deliberately simple; changing the weights is a
/// product decision, not a code cleanup.
fn build_risk_assessment(
    litigations: Vec<Litigation>,
    abnormal_operations: Vec<AbnormalOperation>,
) -> RiskAssessmentSection {
    let litigation_count = litigations.len() as i32;
    let abnormal_count = abnormal_operations.len() as i32;

    let risk_score = (litigation_count * 15 + abnormal_count * 10).min(100);
    let risk_level = if risk_score > 50 {
        RiskLevel::High
    } else if risk_score > 25 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    let mut risk_factors = Vec::new();
    if litigation_count > 0 {
        risk_factors.push(format!("Active litigations: {}", litigation_count));
    }
    if abnormal_count > 0 {
        risk_factors.push(format!(
            "Abnormal operation records: {}",
            abnormal_count
        ));
    }

    RiskAssessmentSection {
        risk_score,
        risk_level,
        risk_factors,
        litigations,
        abnormal_operations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn litigations(n: usize) -> Vec<Litigation> {
        (0..n)
            .map(|i| Litigation {
                id: Uuid::new_v4(),
                company_id: Uuid::new_v4(),
                case_number: format!("CASE-{:03}", i),
                case_type: Some("Contract dispute".to_string()),
                plaintiff: None,
                defendant: None,
                court: Some("Hangzhou Intermediate Court".to_string()),
                status: Some("open".to_string()),
                filed_at: NaiveDate::from_ymd_opt(2024, 1, 1),
            })
            .collect()
    }

    fn abnormal_operations(n: usize) -> Vec<AbnormalOperation> {
        (0..n)
            .map(|i| AbnormalOperation {
                id: Uuid::new_v4(),
                company_id: Uuid::new_v4(),
                reason: format!("Annual report not filed ({})", 2020 + i),
                authority: Some("AMR".to_string()),
                listed_at: NaiveDate::from_ymd_opt(2024, 2, 1),
                removed_at: None,
            })
            .collect()
    }

    fn company() -> Company {
        Company {
            id: Uuid::new_v4(),
            name: "深圳精准诊断设备有限公司".to_string(),
            name_en: Some("Shenzhen Precision Diagnostics Co., Ltd.".to_string()),
            country: Some("China".to_string()),
            province: Some("Guangdong".to_string()),
            city: Some("Shenzhen".to_string()),
            address: Some("12 Keji Road, Nanshan District".to_string()),
            website: Some("https://example.com".to_string()),
            description: Some("IVD instrument manufacturer".to_string()),
            business_type: Some("Manufacturer".to_string()),
            founding_year: Some(2008),
            employee_count: Some(520),
            legal_representative: Some("Chen Yu".to_string()),
            registered_capital: Some("CNY 120,000,000".to_string()),
            registration_number: Some("91440300EXAMPLE".to_string()),
            business_status: Some("Active".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    // -----------------------------------------------------------------------
    // Risk scoring
    // -----------------------------------------------------------------------

    #[test]
    fn two_litigations_one_abnormal_scores_forty_medium() {
        let risk = build_risk_assessment(litigations(2), abnormal_operations(1));
        assert_eq!(risk.risk_score, 40);
        assert_eq!(risk.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn four_litigations_three_abnormal_scores_ninety_high() {
        let risk = build_risk_assessment(litigations(4), abnormal_operations(3));
        assert_eq!(risk.risk_score, 90);
        assert_eq!(risk.risk_level, RiskLevel::High);
    }

    #[test]
    fn three_litigations_alone_score_forty_five_medium() {
        let risk = build_risk_assessment(litigations(3), abnormal_operations(0));
        assert_eq!(risk.risk_score, 45);
        assert_eq!(risk.risk_level, RiskLevel::Medium);
        assert_eq!(risk.risk_factors, vec!["Active litigations: 3".to_string()]);
    }

    #[test]
    fn clean_company_scores_zero_low_with_no_factors() {
        let risk = build_risk_assessment(vec![], vec![]);
        assert_eq!(risk.risk_score, 0);
        assert_eq!(risk.risk_level, RiskLevel::Low);
        assert!(risk.risk_factors.is_empty());
    }

    #[test]
    fn score_is_capped_at_one_hundred() {
        let risk = build_risk_assessment(litigations(12), abnormal_operations(5));
        assert_eq!(risk.risk_score, 100);
        assert_eq!(risk.risk_level, RiskLevel::High);
    }

    #[test]
    fn boundary_scores_sit_below_their_bands() {
        // 25 is still low, 50 is still medium
        let low = build_risk_assessment(litigations(1), abnormal_operations(1));
        assert_eq!(low.risk_score, 25);
        assert_eq!(low.risk_level, RiskLevel::Low);

        let medium = build_risk_assessment(litigations(2), abnormal_operations(2));
        assert_eq!(medium.risk_score, 50);
        assert_eq!(medium.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn factors_name_both_sources() {
        let risk = build_risk_assessment(litigations(1), abnormal_operations(2));
        assert_eq!(
            risk.risk_factors,
            vec![
                "Active litigations: 1".to_string(),
                "Abnormal operation records: 2".to_string(),
            ]
        );
    }

    // -----------------------------------------------------------------------
    // Section builders
    // -----------------------------------------------------------------------

    #[test]
    fn identity_section_excludes_legal_fields() {
        let section = identity_section(&company());
        assert_eq!(section.name, "深圳精准诊断设备有限公司");
        assert_eq!(section.founding_year, Some(2008));
        assert!(section.legal_representative.is_none());
        assert!(section.registered_capital.is_none());
        assert!(section.registration_number.is_none());
        assert!(section.business_status.is_none());
    }

    #[test]
    fn legal_fields_are_applied_on_top_of_identity() {
        let source = company();
        let mut section = identity_section(&source);
        apply_legal_fields(&mut section, &source);
        assert_eq!(section.legal_representative.as_deref(), Some("Chen Yu"));
        assert_eq!(section.business_status.as_deref(), Some("Active"));
    }
}
