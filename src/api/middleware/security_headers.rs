//! Security headers middleware.
//!
//! Adds standard security headers to every response. The CSP permits
//! same-origin assets only, so the bundled Swagger UI keeps working while
//! embedding and cross-origin script injection stay blocked.

use axum::{extract::Request, middleware::Next, response::Response};

pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert("x-frame-options", "DENY".parse().unwrap());
    headers.insert("x-content-type-options", "nosniff".parse().unwrap());
    headers.insert(
        "strict-transport-security",
        "max-age=31536000; includeSubDomains".parse().unwrap(),
    );
    headers.insert(
        "referrer-policy",
        "strict-origin-when-cross-origin".parse().unwrap(),
    );
    headers.insert(
        "content-security-policy",
        "default-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' data:; frame-ancestors 'none'; base-uri 'self'; form-action 'self'"
            .parse()
            .unwrap(),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, middleware, routing::get, Router};
    use tower::ServiceExt;

    async fn test_handler() -> &'static str {
        "OK"
    }

    async fn build_response() -> axum::response::Response {
        let app = Router::new()
            .route("/test", get(test_handler))
            .layer(middleware::from_fn(security_headers_middleware));

        let request = Request::builder().uri("/test").body(Body::empty()).unwrap();

        app.oneshot(request).await.unwrap()
    }

    #[tokio::test]
    async fn test_security_headers_all_present() {
        let resp = build_response().await;
        let headers = resp.headers();
        assert!(headers.get("x-frame-options").is_some());
        assert!(headers.get("x-content-type-options").is_some());
        assert!(headers.get("strict-transport-security").is_some());
        assert!(headers.get("referrer-policy").is_some());
        assert!(headers.get("content-security-policy").is_some());
    }

    #[tokio::test]
    async fn test_security_headers_nosniff() {
        let resp = build_response().await;
        assert_eq!(
            resp.headers()
                .get("x-content-type-options")
                .unwrap()
                .to_str()
                .unwrap(),
            "nosniff"
        );
    }

    #[tokio::test]
    async fn test_security_headers_csp_denies_embedding() {
        let resp = build_response().await;
        let csp = resp
            .headers()
            .get("content-security-policy")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(csp.contains("default-src 'self'"));
        assert!(csp.contains("frame-ancestors 'none'"));
    }

    #[tokio::test]
    async fn test_security_headers_handler_still_runs() {
        let resp = build_response().await;
        assert_eq!(resp.status(), axum::http::StatusCode::OK);
    }
}
