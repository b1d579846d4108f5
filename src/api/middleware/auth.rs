//! Session authentication middleware.
//!
//! Verifies the `Authorization: Bearer <jwt>` header on protected routes and
//! attaches the authenticated subject to the request. Role checks do NOT
//! happen here: handlers load the effective role from the profiles table so
//! that tier changes take effect without re-issuing tokens.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::error::AppError;
use crate::services::session_service::{Claims, SessionService};

/// Extension that holds the verified session subject.
#[derive(Debug, Clone)]
pub struct AuthExtension {
    pub user_id: Uuid,
    pub email: Option<String>,
}

impl From<Claims> for AuthExtension {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
        }
    }
}

/// Token extraction result
#[derive(Debug)]
enum ExtractedToken<'a> {
    /// Bearer token from the Authorization header
    Bearer(&'a str),
    /// No Authorization header present
    None,
    /// Authorization header present but not a Bearer scheme
    Invalid,
}

fn extract_token(request: &Request) -> ExtractedToken<'_> {
    match request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        Some(header) => match header.strip_prefix("Bearer ") {
            Some(token) if !token.is_empty() => ExtractedToken::Bearer(token),
            _ => ExtractedToken::Invalid,
        },
        None => ExtractedToken::None,
    }
}

/// Middleware that requires a valid session token.
///
/// On success inserts an [`AuthExtension`]; on failure short-circuits with a
/// 401 JSON error body.
pub async fn require_session(
    State(sessions): State<Arc<SessionService>>,
    mut request: Request,
    next: Next,
) -> Response {
    match extract_token(&request) {
        ExtractedToken::Bearer(token) => match sessions.verify(token) {
            Ok(claims) => {
                request.extensions_mut().insert(AuthExtension::from(claims));
                next.run(request).await
            }
            Err(e) => e.into_response(),
        },
        ExtractedToken::None => {
            AppError::Unauthenticated("Missing authorization header".to_string()).into_response()
        }
        ExtractedToken::Invalid => {
            AppError::Unauthenticated("Invalid authorization header format".to_string())
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, middleware, routing::get, Extension, Router};
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use tower::ServiceExt;

    use crate::config::Config;

    const SECRET: &str = "middleware-test-secret";

    fn session_service() -> Arc<SessionService> {
        let config = Config {
            database_url: "postgres://localhost/test".to_string(),
            bind_address: "127.0.0.1:0".to_string(),
            log_level: "debug".to_string(),
            jwt_secret: SECRET.to_string(),
        };
        Arc::new(SessionService::new(&config))
    }

    fn sign(sub: Uuid, exp_offset_hours: i64) -> String {
        let claims = Claims {
            sub,
            email: Some("analyst@example.com".to_string()),
            exp: (Utc::now() + Duration::hours(exp_offset_hours)).timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    async fn whoami(Extension(auth): Extension<AuthExtension>) -> String {
        auth.user_id.to_string()
    }

    fn app() -> Router {
        Router::new()
            .route("/whoami", get(whoami))
            .layer(middleware::from_fn_with_state(
                session_service(),
                require_session,
            ))
    }

    #[tokio::test]
    async fn test_valid_bearer_token_passes_through() {
        let sub = Uuid::new_v4();
        let request = Request::builder()
            .uri("/whoami")
            .header("authorization", format!("Bearer {}", sign(sub, 1)))
            .body(Body::empty())
            .unwrap();

        let resp = app().oneshot(request).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let request = Request::builder()
            .uri("/whoami")
            .body(Body::empty())
            .unwrap();

        let resp = app().oneshot(request).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_non_bearer_scheme_is_unauthorized() {
        let request = Request::builder()
            .uri("/whoami")
            .header("authorization", "Basic dXNlcjpwYXNz")
            .body(Body::empty())
            .unwrap();

        let resp = app().oneshot(request).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthorized() {
        let request = Request::builder()
            .uri("/whoami")
            .header(
                "authorization",
                format!("Bearer {}", sign(Uuid::new_v4(), -1)),
            )
            .body(Body::empty())
            .unwrap();

        let resp = app().oneshot(request).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_empty_bearer_token_is_unauthorized() {
        let request = Request::builder()
            .uri("/whoami")
            .header("authorization", "Bearer ")
            .body(Body::empty())
            .unwrap();

        let resp = app().oneshot(request).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
