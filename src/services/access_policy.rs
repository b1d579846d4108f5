//! Role-based access resolution for due-diligence reports.
//!
//! The (role, report type) table below is the single authority for what a
//! session may view and download and how much data a generated report
//! contains. Handlers never consult roles directly; they ask this module.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::profile::Role;
use crate::models::report::ReportType;

/// How much of the assembled data a report carries.
///
/// Ordered so that a wider slice always compares greater than a narrower
/// one. `None` means the pairing is not viewable at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DataLevel {
    None,
    Basic,
    Standard,
    Full,
}

impl DataLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataLevel::None => "none",
            DataLevel::Basic => "basic",
            DataLevel::Standard => "standard",
            DataLevel::Full => "full",
        }
    }
}

/// Resolved access for one (role, report type) pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct AccessDecision {
    pub can_view: bool,
    pub can_download: bool,
    pub data_level: DataLevel,
}

impl AccessDecision {
    const DENY: AccessDecision = AccessDecision {
        can_view: false,
        can_download: false,
        data_level: DataLevel::None,
    };

    const fn view(data_level: DataLevel) -> AccessDecision {
        AccessDecision {
            can_view: true,
            can_download: false,
            data_level,
        }
    }

    const fn full() -> AccessDecision {
        AccessDecision {
            can_view: true,
            can_download: true,
            data_level: DataLevel::Full,
        }
    }
}

/// Look up the fixed access table.
///
/// Every pairing is spelled out so that adding a role or report type fails
/// to compile until this table says what the new pairing gets. Unknown
/// roles are mapped to `Guest` before they reach here, which denies them.
pub fn resolve_access(role: Role, report_type: ReportType) -> AccessDecision {
    match (role, report_type) {
        (Role::Guest, ReportType::Basic) => AccessDecision::DENY,
        (Role::Guest, ReportType::Standard) => AccessDecision::DENY,
        (Role::Guest, ReportType::Comprehensive) => AccessDecision::DENY,

        (Role::User, ReportType::Basic) => AccessDecision::view(DataLevel::Basic),
        (Role::User, ReportType::Standard) => AccessDecision::view(DataLevel::Standard),
        (Role::User, ReportType::Comprehensive) => AccessDecision::DENY,

        (Role::Vip, ReportType::Basic) => AccessDecision::full(),
        (Role::Vip, ReportType::Standard) => AccessDecision::full(),
        (Role::Vip, ReportType::Comprehensive) => AccessDecision::full(),
    }
}

/// One-line summary of what a report tier contains, used by the public
/// report-type catalog.
pub fn tier_summary(report_type: ReportType) -> &'static str {
    match report_type {
        ReportType::Basic => "Company identity and legal standing",
        ReportType::Standard => {
            "Basic content plus regulatory registrations and intellectual property"
        }
        ReportType::Comprehensive => {
            "Standard content plus risk assessment, litigation history and branch network"
        }
    }
}

/// Catalog feature list for a report tier. Cumulative: each tier repeats
/// everything the tier below it carries before listing its additions.
pub fn tier_features(report_type: ReportType) -> &'static [&'static str] {
    match report_type {
        ReportType::Basic => &[
            "Company identity and contacts",
            "Legal standing and registration details",
        ],
        ReportType::Standard => &[
            "Company identity and contacts",
            "Legal standing and registration details",
            "FDA and NMPA registration records",
            "Patent and trademark portfolio",
        ],
        ReportType::Comprehensive => &[
            "Company identity and contacts",
            "Legal standing and registration details",
            "FDA and NMPA registration records",
            "Patent and trademark portfolio",
            "Litigation and abnormal-operation history",
            "Branch network",
            "Risk score and level",
            "Report download",
        ],
    }
}
