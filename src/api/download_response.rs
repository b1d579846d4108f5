//! Attachment response helper for rendered report downloads.

use axum::body::Body;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

/// A rendered Markdown document served as a file attachment.
pub struct MarkdownAttachment {
    pub filename: String,
    pub content: Bytes,
}

impl MarkdownAttachment {
    pub fn new(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}

impl IntoResponse for MarkdownAttachment {
    fn into_response(self) -> Response {
        let builder = Response::builder()
            .status(StatusCode::OK)
            .header(CONTENT_TYPE, "text/markdown; charset=utf-8")
            .header(CONTENT_LENGTH, self.content.len())
            .header(
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", self.filename),
            );

        match builder.body(Body::from(self.content)) {
            Ok(response) => response,
            // Only reachable if the filename slips non-header bytes through;
            // the slug generator keeps filenames ASCII.
            Err(e) => {
                tracing::error!(error = %e, "Failed to build attachment response");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_headers() {
        let resp = MarkdownAttachment::new(
            "due-diligence-report-acme-2026-08-25.md",
            "# Due Diligence Report\n",
        )
        .into_response();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("content-type").unwrap().to_str().unwrap(),
            "text/markdown; charset=utf-8"
        );
        assert_eq!(
            resp.headers()
                .get("content-disposition")
                .unwrap()
                .to_str()
                .unwrap(),
            "attachment; filename=\"due-diligence-report-acme-2026-08-25.md\""
        );
        assert_eq!(
            resp.headers()
                .get("content-length")
                .unwrap()
                .to_str()
                .unwrap(),
            "23"
        );
    }

    #[test]
    fn test_attachment_empty_body() {
        let resp = MarkdownAttachment::new("empty.md", "").into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()
                .get("content-length")
                .unwrap()
                .to_str()
                .unwrap(),
            "0"
        );
    }
}
