//! Company directory and related regulatory data.
//!
//! All tables read here are maintained by external sync pipelines; this
//! service only queries them.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::company::{Branch, Company};
use crate::models::intellectual_property::{Patent, Trademark};
use crate::models::registration::{FdaRegistration, NmpaRegistration};
use crate::models::risk::{AbnormalOperation, Litigation};

const COMPANY_COLUMNS: &str = r#"
    id, name, name_en, country, province, city, address, website,
    description, business_type, founding_year, employee_count,
    legal_representative, registered_capital, registration_number,
    business_status, created_at, updated_at
"#;

pub struct CompanyService {
    db: PgPool,
}

impl CompanyService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn get_company(&self, company_id: Uuid) -> Result<Company> {
        sqlx::query_as::<_, Company>(&format!(
            "SELECT {COMPANY_COLUMNS} FROM companies WHERE id = $1"
        ))
        .bind(company_id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Company not found".to_string()))
    }

    /// Case-insensitive substring search over the Chinese and English names.
    /// A missing query lists the directory.
    pub async fn search(
        &self,
        query: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Company>, i64)> {
        let companies = sqlx::query_as::<_, Company>(&format!(
            r#"
            SELECT {COMPANY_COLUMNS}
            FROM companies
            WHERE ($1::text IS NULL
                   OR name ILIKE '%' || $1 || '%'
                   OR name_en ILIKE '%' || $1 || '%')
            ORDER BY name
            OFFSET $2
            LIMIT $3
            "#
        ))
        .bind(query)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.db)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM companies
            WHERE ($1::text IS NULL
                   OR name ILIKE '%' || $1 || '%'
                   OR name_en ILIKE '%' || $1 || '%')
            "#,
        )
        .bind(query)
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok((companies, total))
    }

    pub async fn list_fda_registrations(
        &self,
        company_id: Uuid,
        limit: i64,
    ) -> Result<Vec<FdaRegistration>> {
        sqlx::query_as::<_, FdaRegistration>(
            r#"
            SELECT id, company_id, registration_number, device_name, device_class,
                   product_code, regulation_number, status, cleared_at
            FROM fda_registrations
            WHERE company_id = $1
            ORDER BY cleared_at DESC NULLS LAST, registration_number
            LIMIT $2
            "#,
        )
        .bind(company_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn count_fda_registrations(&self, company_id: Uuid) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM fda_registrations WHERE company_id = $1")
            .bind(company_id)
            .fetch_one(&self.db)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn list_nmpa_registrations(
        &self,
        company_id: Uuid,
        limit: i64,
    ) -> Result<Vec<NmpaRegistration>> {
        sqlx::query_as::<_, NmpaRegistration>(
            r#"
            SELECT id, company_id, registration_number, product_name, product_name_en,
                   management_class, status, approved_at, expires_at
            FROM nmpa_registrations
            WHERE company_id = $1
            ORDER BY approved_at DESC NULLS LAST, registration_number
            LIMIT $2
            "#,
        )
        .bind(company_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn count_nmpa_registrations(&self, company_id: Uuid) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM nmpa_registrations WHERE company_id = $1")
            .bind(company_id)
            .fetch_one(&self.db)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn list_patents(&self, company_id: Uuid, limit: i64) -> Result<Vec<Patent>> {
        sqlx::query_as::<_, Patent>(
            r#"
            SELECT id, company_id, title, patent_number, patent_type, status,
                   filed_at, granted_at
            FROM patents
            WHERE company_id = $1
            ORDER BY filed_at DESC NULLS LAST, patent_number
            LIMIT $2
            "#,
        )
        .bind(company_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn count_patents(&self, company_id: Uuid) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM patents WHERE company_id = $1")
            .bind(company_id)
            .fetch_one(&self.db)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn list_trademarks(&self, company_id: Uuid, limit: i64) -> Result<Vec<Trademark>> {
        sqlx::query_as::<_, Trademark>(
            r#"
            SELECT id, company_id, mark_name, registration_number, intl_class,
                   status, registered_at
            FROM trademarks
            WHERE company_id = $1
            ORDER BY registered_at DESC NULLS LAST, registration_number
            LIMIT $2
            "#,
        )
        .bind(company_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn count_trademarks(&self, company_id: Uuid) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM trademarks WHERE company_id = $1")
            .bind(company_id)
            .fetch_one(&self.db)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn list_litigations(&self, company_id: Uuid) -> Result<Vec<Litigation>> {
        sqlx::query_as::<_, Litigation>(
            r#"
            SELECT id, company_id, case_number, case_type, plaintiff, defendant,
                   court, status, filed_at
            FROM litigations
            WHERE company_id = $1
            ORDER BY filed_at DESC NULLS LAST, case_number
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.db)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn list_abnormal_operations(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<AbnormalOperation>> {
        sqlx::query_as::<_, AbnormalOperation>(
            r#"
            SELECT id, company_id, reason, authority, listed_at, removed_at
            FROM abnormal_operations
            WHERE company_id = $1
            ORDER BY listed_at DESC NULLS LAST
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.db)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn list_branches(&self, company_id: Uuid) -> Result<Vec<Branch>> {
        sqlx::query_as::<_, Branch>(
            r#"
            SELECT id, company_id, name, address, status
            FROM branches
            WHERE company_id = $1
            ORDER BY name
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.db)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }
}
