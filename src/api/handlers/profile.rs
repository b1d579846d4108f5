//! Authenticated user profile handlers.

use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::api::middleware::auth::AuthExtension;
use crate::api::SharedState;
use crate::error::Result;
use crate::models::profile::Role;
use crate::services::role_service::RoleService;

/// Create profile routes
pub fn router() -> Router<SharedState> {
    Router::new().route("/", get(get_profile))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: Option<String>,
    pub display_name: Option<String>,
    /// Effective tier; unrecognized stored values surface as guest
    pub role: Role,
}

/// The caller's profile and effective role
#[utoipa::path(
    get,
    path = "",
    context_path = "/api/profile",
    tag = "profile",
    responses(
        (status = 200, description = "Caller's profile", body = ProfileResponse),
        (status = 401, description = "Missing or invalid session"),
        (status = 404, description = "Profile not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_profile(
    State(state): State<SharedState>,
    Extension(auth): Extension<AuthExtension>,
) -> Result<Json<ProfileResponse>> {
    let profile = RoleService::new(state.db.clone())
        .get_profile(auth.user_id)
        .await?;

    let role = profile.role();
    Ok(Json(ProfileResponse {
        id: profile.id,
        email: profile.email,
        display_name: profile.display_name,
        role,
    }))
}

#[derive(OpenApi)]
#[openapi(paths(get_profile), components(schemas(ProfileResponse)))]
pub struct ProfileApiDoc;
