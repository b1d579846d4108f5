//! OpenAPI document assembly.
//!
//! Each handler module carries its own `#[derive(OpenApi)]` doc; this module
//! merges them into the single document served at `/api/openapi.json`.

use serde::Serialize;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use crate::api::handlers;

/// Standard error body returned by every endpoint on failure.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Stable machine-readable error code.
    #[schema(example = "NOT_FOUND")]
    pub code: String,
    /// Human-readable description of the failure.
    #[schema(example = "Report not found")]
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "RegIntel Backend API",
        version = "0.3.0",
        description = "Regulatory intelligence backend for medical-device companies: \
                       company search, tiered due-diligence reports, and report downloads.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Current host")
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Service health and readiness"),
        (name = "companies", description = "Company directory and search"),
        (name = "due-diligence", description = "Due-diligence report generation and download"),
        (name = "permissions", description = "Role permission checks"),
        (name = "profile", description = "Authenticated user profile")
    ),
    components(schemas(ErrorResponse))
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Supabase-issued JWT access token"))
                        .build(),
                ),
            );
        }
    }
}

/// Build the full API document by merging every handler module's doc.
pub fn build_openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.merge(handlers::health::HealthApiDoc::openapi());
    doc.merge(handlers::companies::CompaniesApiDoc::openapi());
    doc.merge(handlers::due_diligence::DueDiligenceApiDoc::openapi());
    doc.merge(handlers::permissions::PermissionsApiDoc::openapi());
    doc.merge(handlers::profile::ProfileApiDoc::openapi());
    doc
}
