//! RegIntel - Backend Library
//!
//! Regulatory-intelligence backend for medical-device companies: company
//! directory, tiered due-diligence reports, and report downloads.

#[macro_use]
mod macros;

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod telemetry;

pub use config::Config;
pub use error::{AppError, Result};
