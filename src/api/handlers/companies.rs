//! Company directory handlers.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, OpenApi, ToSchema};
use uuid::Uuid;

use crate::api::dto::Pagination;
use crate::api::SharedState;
use crate::error::Result;
use crate::models::company::Company;
use crate::services::company_service::CompanyService;

/// Create company directory routes
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(search_companies))
        .route("/:id", get(get_company))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CompanySearchQuery {
    /// Case-insensitive substring match against Chinese and English names
    pub q: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CompanyListResponse {
    pub items: Vec<Company>,
    pub pagination: Pagination,
}

/// Clamped paging window for the company search.
///
/// `per_page` is held to 1..=100 and the offset is computed in i64 so the
/// largest representable page cannot wrap.
fn page_window(query: &CompanySearchQuery) -> (u32, u32, i64) {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    let offset = (i64::from(page) - 1) * i64::from(per_page);
    (page, per_page, offset)
}

/// Search the company directory
#[utoipa::path(
    get,
    path = "",
    context_path = "/api/companies",
    tag = "companies",
    params(CompanySearchQuery),
    responses(
        (status = 200, description = "Matching companies", body = CompanyListResponse),
        (status = 401, description = "Missing or invalid session"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn search_companies(
    State(state): State<SharedState>,
    Query(query): Query<CompanySearchQuery>,
) -> Result<Json<CompanyListResponse>> {
    let (page, per_page, offset) = page_window(&query);

    // Blank queries list the directory
    let q = query.q.as_deref().map(str::trim).filter(|s| !s.is_empty());

    let (items, total) = CompanyService::new(state.db.clone())
        .search(q, offset, per_page as i64)
        .await?;

    Ok(Json(CompanyListResponse {
        items,
        pagination: Pagination::new(page, per_page, total),
    }))
}

/// Fetch a single company record
#[utoipa::path(
    get,
    path = "/{id}",
    context_path = "/api/companies",
    tag = "companies",
    params(("id" = Uuid, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Company record", body = Company),
        (status = 401, description = "Missing or invalid session"),
        (status = 404, description = "Company not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_company(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Company>> {
    let company = CompanyService::new(state.db.clone()).get_company(id).await?;
    Ok(Json(company))
}

#[derive(OpenApi)]
#[openapi(
    paths(search_companies, get_company),
    components(schemas(Company, CompanyListResponse, Pagination))
)]
pub struct CompaniesApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_all_fields() {
        let query: CompanySearchQuery =
            serde_json::from_str(r#"{"q": "medtech", "page": 2, "per_page": 50}"#).unwrap();
        assert_eq!(query.q.as_deref(), Some("medtech"));
        assert_eq!(query.page, Some(2));
        assert_eq!(query.per_page, Some(50));
    }

    #[test]
    fn test_search_query_defaults_to_none() {
        let query: CompanySearchQuery = serde_json::from_str("{}").unwrap();
        assert!(query.q.is_none());
        assert!(query.page.is_none());
        assert!(query.per_page.is_none());
    }

    #[test]
    fn test_page_window_defaults() {
        let query: CompanySearchQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(page_window(&query), (1, 20, 0));
    }

    #[test]
    fn test_page_window_clamps_per_page_at_both_ends() {
        let query: CompanySearchQuery = serde_json::from_str(r#"{"per_page": 0}"#).unwrap();
        assert_eq!(page_window(&query), (1, 1, 0));

        let query: CompanySearchQuery = serde_json::from_str(r#"{"per_page": 1000}"#).unwrap();
        assert_eq!(page_window(&query), (1, 100, 0));
    }

    #[test]
    fn test_page_window_survives_the_maximum_page() {
        let query: CompanySearchQuery =
            serde_json::from_str(r#"{"page": 4294967295, "per_page": 100}"#).unwrap();
        let (page, per_page, offset) = page_window(&query);
        assert_eq!(page, u32::MAX);
        assert_eq!(per_page, 100);
        assert_eq!(offset, (i64::from(u32::MAX) - 1) * 100);
    }

    #[test]
    fn test_company_list_response_serialization() {
        let resp = CompanyListResponse {
            items: vec![],
            pagination: Pagination::new(1, 20, 0),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json["items"].as_array().unwrap().is_empty());
        assert_eq!(json["pagination"]["total"], 0);
        assert_eq!(json["pagination"]["total_pages"], 0);
    }
}
