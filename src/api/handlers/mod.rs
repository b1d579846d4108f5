//! HTTP request handlers, one module per resource.

pub mod companies;
pub mod due_diligence;
pub mod health;
pub mod permissions;
pub mod profile;
