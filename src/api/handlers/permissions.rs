//! Permission check handlers.

use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::api::middleware::auth::AuthExtension;
use crate::api::SharedState;
use crate::error::Result;
use crate::models::profile::Role;
use crate::services::permission_service::PermissionService;
use crate::services::role_service::RoleService;

/// Create permission routes
pub fn router() -> Router<SharedState> {
    Router::new().route("/check", get(check_permission))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PermissionCheckQuery {
    /// Resource name, e.g. "market_access"
    pub resource: String,
    /// Action name, e.g. "download"
    pub action: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PermissionCheckResponse {
    pub role: Role,
    pub resource: String,
    pub action: String,
    pub allowed: bool,
}

/// Check whether the caller's role allows an action on a resource
#[utoipa::path(
    get,
    path = "/check",
    context_path = "/api/permissions",
    tag = "permissions",
    params(PermissionCheckQuery),
    responses(
        (status = 200, description = "Lookup result; unknown pairings deny", body = PermissionCheckResponse),
        (status = 401, description = "Missing or invalid session"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn check_permission(
    State(state): State<SharedState>,
    Extension(auth): Extension<AuthExtension>,
    Query(query): Query<PermissionCheckQuery>,
) -> Result<Json<PermissionCheckResponse>> {
    let role = RoleService::new(state.db.clone())
        .get_role(auth.user_id)
        .await?;
    let allowed = PermissionService::new(state.db.clone())
        .is_allowed(role, &query.resource, &query.action)
        .await?;

    Ok(Json(PermissionCheckResponse {
        role,
        resource: query.resource,
        action: query.action,
        allowed,
    }))
}

#[derive(OpenApi)]
#[openapi(
    paths(check_permission),
    components(schemas(PermissionCheckResponse, Role))
)]
pub struct PermissionsApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_query_requires_both_fields() {
        let ok: PermissionCheckQuery =
            serde_json::from_str(r#"{"resource": "market_access", "action": "download"}"#)
                .unwrap();
        assert_eq!(ok.resource, "market_access");
        assert_eq!(ok.action, "download");

        assert!(serde_json::from_str::<PermissionCheckQuery>(r#"{"resource": "x"}"#).is_err());
    }

    #[test]
    fn test_check_response_serializes_role_lowercase() {
        let resp = PermissionCheckResponse {
            role: Role::Vip,
            resource: "market_access".to_string(),
            action: "download".to_string(),
            allowed: true,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["role"], "vip");
        assert_eq!(json["allowed"], true);
    }
}
