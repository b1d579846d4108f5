//! HTTP middleware layers.

pub mod auth;
pub mod security_headers;
pub mod tracing;
