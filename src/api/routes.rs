//! Route definitions for the API.

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers;
use super::middleware::auth::require_session;
use super::middleware::security_headers::security_headers_middleware;
use super::middleware::tracing::correlation_id_middleware;
use super::SharedState;
use crate::services::session_service::SessionService;

/// Create the main API router
pub fn create_router(state: SharedState) -> Router {
    // Build OpenAPI spec once at startup
    let openapi = super::openapi::build_openapi();

    Router::new()
        // Health endpoints (no auth required)
        .route("/health", get(handlers::health::health_check))
        .route("/healthz", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // OpenAPI spec (served by SwaggerUi at /api/openapi.json) and Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api/openapi.json", openapi))
        // API routes
        .nest("/api", api_routes(state.clone()))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(correlation_id_middleware))
        .with_state(state)
}

/// API routes mounted under `/api`
fn api_routes(state: SharedState) -> Router<SharedState> {
    // One session verifier shared by every protected route
    let sessions = Arc::new(SessionService::new(&state.config));

    Router::new()
        // Report-type catalog (public, no auth)
        .nest("/due-diligence", handlers::due_diligence::catalog_router())
        // Report download routes with session middleware
        .nest(
            "/due-diligence",
            handlers::due_diligence::report_router().layer(middleware::from_fn_with_state(
                sessions.clone(),
                require_session,
            )),
        )
        // Company directory and per-company report routes with session middleware
        .nest(
            "/companies",
            handlers::companies::router()
                .merge(handlers::due_diligence::company_router())
                .layer(middleware::from_fn_with_state(
                    sessions.clone(),
                    require_session,
                )),
        )
        // Profile routes with session middleware
        .nest(
            "/profile",
            handlers::profile::router().layer(middleware::from_fn_with_state(
                sessions.clone(),
                require_session,
            )),
        )
        // Permission check routes with session middleware
        .nest(
            "/permissions",
            handlers::permissions::router()
                .layer(middleware::from_fn_with_state(sessions, require_session)),
        )
}
