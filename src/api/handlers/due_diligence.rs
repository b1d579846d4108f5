//! Due-diligence report handlers.
//!
//! Generation and history hang off the company resource; download and the
//! public report-type catalog live under `/api/due-diligence`.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::api::download_response::MarkdownAttachment;
use crate::api::middleware::auth::AuthExtension;
use crate::api::SharedState;
use crate::error::{AppError, Result};
use crate::models::profile::Role;
use crate::models::report::{DueDiligenceReport, ReportType};
use crate::services::access_policy::{self, AccessDecision, DataLevel};
use crate::services::report_service::ReportService;

/// Report routes nested under `/api/companies`
pub fn company_router() -> Router<SharedState> {
    Router::new().route(
        "/:id/due-diligence",
        post(generate_report).get(report_history),
    )
}

/// Authenticated report routes nested under `/api/due-diligence`
pub fn report_router() -> Router<SharedState> {
    Router::new().route("/:report_id/download", post(download_report))
}

/// Public routes nested under `/api/due-diligence`
pub fn catalog_router() -> Router<SharedState> {
    Router::new().route("/report-types", get(list_report_types))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportRequest {
    /// One of "basic", "standard", "comprehensive"
    #[schema(example = "standard")]
    pub report_type: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportHistoryResponse {
    pub items: Vec<DueDiligenceReport>,
}

/// Catalog entry describing one report tier.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReportTypeDescriptor {
    #[schema(example = "standard")]
    pub id: &'static str,
    pub display_name_en: &'static str,
    pub display_name_zh: &'static str,
    pub summary: &'static str,
    /// Everything included at this tier, cumulative over the tiers below it.
    #[schema(value_type = Vec<String>)]
    pub features: &'static [&'static str],
    pub guest: AccessDecision,
    pub user: AccessDecision,
    pub vip: AccessDecision,
}

fn describe(report_type: ReportType) -> ReportTypeDescriptor {
    let (display_name_en, display_name_zh) = match report_type {
        ReportType::Basic => ("Basic Report", "基础报告"),
        ReportType::Standard => ("Standard Report", "标准报告"),
        ReportType::Comprehensive => ("Comprehensive Report", "全面尽调报告"),
    };

    ReportTypeDescriptor {
        id: report_type.as_str(),
        display_name_en,
        display_name_zh,
        summary: access_policy::tier_summary(report_type),
        features: access_policy::tier_features(report_type),
        guest: access_policy::resolve_access(Role::Guest, report_type),
        user: access_policy::resolve_access(Role::User, report_type),
        vip: access_policy::resolve_access(Role::Vip, report_type),
    }
}

/// Generate a due-diligence report for a company
#[utoipa::path(
    post,
    path = "/{id}/due-diligence",
    context_path = "/api/companies",
    tag = "due-diligence",
    params(("id" = Uuid, Path, description = "Company ID")),
    request_body = GenerateReportRequest,
    responses(
        (status = 200, description = "Report generated and persisted", body = DueDiligenceReport),
        (status = 401, description = "Missing or invalid session"),
        (status = 403, description = "Caller's role may not view this report type"),
        (status = 404, description = "Company not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn generate_report(
    State(state): State<SharedState>,
    Extension(auth): Extension<AuthExtension>,
    Path(id): Path<Uuid>,
    Json(body): Json<GenerateReportRequest>,
) -> Result<Json<DueDiligenceReport>> {
    // An unknown type is the all-false row of the access table, not a 400.
    let report_type = ReportType::parse(&body.report_type).ok_or_else(|| {
        AppError::InsufficientPermissions(format!(
            "Unknown report type '{}'",
            body.report_type
        ))
    })?;

    let report = ReportService::new(state.db.clone())
        .generate(id, report_type, auth.user_id)
        .await?;

    Ok(Json(report))
}

/// The caller's recent reports for a company, newest first
#[utoipa::path(
    get,
    path = "/{id}/due-diligence",
    context_path = "/api/companies",
    tag = "due-diligence",
    params(("id" = Uuid, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Up to 10 most recent reports", body = ReportHistoryResponse),
        (status = 401, description = "Missing or invalid session"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn report_history(
    State(state): State<SharedState>,
    Extension(auth): Extension<AuthExtension>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReportHistoryResponse>> {
    let items = ReportService::new(state.db.clone())
        .list_history(id, auth.user_id)
        .await?;
    Ok(Json(ReportHistoryResponse { items }))
}

/// Download a report as a Markdown attachment
#[utoipa::path(
    post,
    path = "/{report_id}/download",
    context_path = "/api/due-diligence",
    tag = "due-diligence",
    params(("report_id" = Uuid, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Rendered Markdown attachment", content_type = "text/markdown"),
        (status = 401, description = "Missing or invalid session"),
        (status = 403, description = "Report is not downloadable at the caller's tier"),
        (status = 404, description = "Report not found or not owned by the caller"),
        (status = 410, description = "Report has expired"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn download_report(
    State(state): State<SharedState>,
    Extension(auth): Extension<AuthExtension>,
    Path(report_id): Path<Uuid>,
) -> Result<MarkdownAttachment> {
    let download = ReportService::new(state.db.clone())
        .prepare_download(report_id, auth.user_id)
        .await?;
    Ok(MarkdownAttachment::new(download.filename, download.markdown))
}

/// List report tiers and per-role access
#[utoipa::path(
    get,
    path = "/report-types",
    context_path = "/api/due-diligence",
    tag = "due-diligence",
    responses(
        (status = 200, description = "Report tier catalog", body = Vec<ReportTypeDescriptor>)
    )
)]
pub async fn list_report_types() -> Json<Vec<ReportTypeDescriptor>> {
    Json(ReportType::ALL.into_iter().map(describe).collect())
}

#[derive(OpenApi)]
#[openapi(
    paths(generate_report, report_history, download_report, list_report_types),
    components(schemas(
        GenerateReportRequest,
        ReportHistoryResponse,
        ReportTypeDescriptor,
        DueDiligenceReport,
        AccessDecision,
        DataLevel,
    ))
)]
pub struct DueDiligenceApiDoc;
