//! Database models (SQLx).

pub mod company;
pub mod intellectual_property;
pub mod profile;
pub mod registration;
pub mod report;
pub mod risk;
