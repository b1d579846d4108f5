//! Test fixtures and data factories for backend tests
//!
//! Provides reusable test data for profiles and companies.

#![allow(dead_code)]

use uuid::Uuid;

/// Test user profile data
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: String,
}

impl TestUser {
    pub fn guest() -> Self {
        Self::with_role("guest")
    }

    pub fn user() -> Self {
        Self::with_role("user")
    }

    pub fn vip() -> Self {
        Self::with_role("vip")
    }

    /// Fresh id per call so parallel tests never share a profile row.
    pub fn with_role(role: &str) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            email: format!("{}-{}@test.local", role, id.simple()),
            display_name: format!("Test {}", role),
            role: role.to_string(),
        }
    }
}

/// Test company data
pub struct TestCompany {
    pub name: String,
    pub name_en: String,
    pub country: String,
    pub city: String,
    pub legal_representative: String,
    pub registered_capital: String,
    pub registration_number: String,
    pub business_status: String,
}

impl TestCompany {
    pub fn medtech() -> Self {
        let tag = Uuid::new_v4().simple().to_string();
        Self {
            name: format!("杭州示例医疗科技有限公司-{}", &tag[..8]),
            name_en: format!("Hangzhou Example Medtech {}", &tag[..8]),
            country: "China".to_string(),
            city: "Hangzhou".to_string(),
            legal_representative: "Wang Lei".to_string(),
            registered_capital: "CNY 50,000,000".to_string(),
            registration_number: format!("91330100{}", &tag[..8].to_uppercase()),
            business_status: "Active".to_string(),
        }
    }
}
