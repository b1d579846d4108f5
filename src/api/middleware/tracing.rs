//! Request tracing middleware with correlation ID propagation.
//!
//! Every request is wrapped in a `tracing` span carrying a correlation ID, so
//! log lines from handlers, services, and SQLx queries can be stitched back
//! together per request.

use axum::{
    extract::Request,
    http::{header::HeaderValue, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

/// The header name for correlation IDs.
pub const CORRELATION_ID_HEADER: &str = "X-Correlation-ID";

/// W3C Trace Context header.
const TRACEPARENT_HEADER: &str = "traceparent";

/// Extension that holds the correlation ID for the current request.
#[derive(Debug, Clone)]
pub struct CorrelationId(pub String);

impl CorrelationId {
    pub fn new(id: String) -> Self {
        Self(id)
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pick the correlation ID for a request.
///
/// Priority: explicit `X-Correlation-ID` header, then the trace-id field of a
/// W3C `traceparent` header, then a freshly generated UUID.
fn correlation_id_from(headers: &HeaderMap) -> CorrelationId {
    if let Some(id) = headers
        .get(CORRELATION_ID_HEADER)
        .and_then(|h| h.to_str().ok())
    {
        return CorrelationId::new(id.to_string());
    }

    if let Some(trace_id) = headers
        .get(TRACEPARENT_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|tp| tp.split('-').nth(1))
    {
        return CorrelationId::new(trace_id.to_string());
    }

    CorrelationId::generate()
}

/// Correlation ID middleware.
///
/// Attaches the ID as a request extension, echoes it back in the response
/// headers, and wraps the request in an `info_span!("http_request")`.
pub async fn correlation_id_middleware(mut request: Request, next: Next) -> Response {
    let correlation_id = correlation_id_from(request.headers());

    let method = request.method().clone();
    let uri = request.uri().path().to_string();

    request.extensions_mut().insert(correlation_id.clone());

    let span = tracing::info_span!(
        "http_request",
        correlation_id = %correlation_id,
        method = %method,
        uri = %uri,
    );

    async move {
        let mut response = next.run(request).await;

        if let Ok(value) = HeaderValue::from_str(correlation_id.as_str()) {
            response.headers_mut().insert(CORRELATION_ID_HEADER, value);
        }

        tracing::info!(
            correlation_id = %correlation_id,
            status = %response.status().as_u16(),
            "Request completed"
        );

        response
    }
    .instrument(span)
    .await
}
