//! Company repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use glyms_core::error::{AppError, ErrorKind};
use glyms_core::result::AppResult;
use glyms_entity::company::Company;
use glyms_entity::user::{CreateUser, User};

use super::is_unique_violation;

/// Repository for companies.
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    /// Create a new company repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a company by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Company>> {
        sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find company", e))
    }

    /// Rename a company.
    pub async fn rename(&self, id: Uuid, name: &str) -> AppResult<Company> {
        sqlx::query_as::<_, Company>("UPDATE companies SET name = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename company", e))?
            .ok_or_else(|| AppError::not_found("Company not found"))
    }

    /// Create a company and its first administrator atomically.
    ///
    /// `admin.company_id` is ignored and replaced by the new company's id.
    pub async fn register(&self, name: &str, admin: &CreateUser) -> AppResult<(Company, User)> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let company = sqlx::query_as::<_, Company>(
            "INSERT INTO companies (name) VALUES ($1) RETURNING *",
        )
        .bind(name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create company", e))?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash, first_name, last_name, role, company_id) \
             VALUES (LOWER($1), $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&admin.email)
        .bind(&admin.password_hash)
        .bind(&admin.first_name)
        .bind(&admin.last_name)
        .bind(admin.role)
        .bind(company.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, "users_email_lower_key") {
                AppError::conflict(format!("Email '{}' is already registered", admin.email))
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create admin user", e)
            }
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit registration", e)
        })?;

        Ok((company, user))
    }
}
