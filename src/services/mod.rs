//! Business logic services.

pub mod access_log_service;
pub mod access_policy;
pub mod company_service;
pub mod permission_service;
pub mod report_render;
pub mod report_service;
pub mod role_service;
pub mod session_service;
