//! Blacklisted place repository.

use sqlx::PgPool;
use uuid::Uuid;

use glyms_core::error::{AppError, ErrorKind};
use glyms_core::result::AppResult;
use glyms_entity::place::{BlacklistScope, BlacklistedPlace};

use super::is_unique_violation;

/// Repository for company- and event-scoped place blacklists.
#[derive(Debug, Clone)]
pub struct BlacklistRepository {
    pool: PgPool,
}

impl BlacklistRepository {
    /// Create a new blacklist repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Entries of one scope.
    pub async fn list(&self, scope: BlacklistScope) -> AppResult<Vec<BlacklistedPlace>> {
        let (company_id, event_id) = scope.columns();
        sqlx::query_as::<_, BlacklistedPlace>(
            "SELECT * FROM blacklisted_places \
             WHERE company_id IS NOT DISTINCT FROM $1 AND event_id IS NOT DISTINCT FROM $2 \
             ORDER BY created_at",
        )
        .bind(company_id)
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list blacklist", e))
    }

    /// Add a place to a scope.
    pub async fn add(&self, scope: BlacklistScope, place_id: &str) -> AppResult<BlacklistedPlace> {
        let (company_id, event_id) = scope.columns();
        sqlx::query_as::<_, BlacklistedPlace>(
            "INSERT INTO blacklisted_places (place_id, company_id, event_id) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(place_id)
        .bind(company_id)
        .bind(event_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, "blacklisted_places_company_key")
                || is_unique_violation(&e, "blacklisted_places_event_key")
            {
                AppError::conflict(format!("Place '{place_id}' is already blacklisted"))
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to blacklist place", e)
            }
        })
    }

    /// Remove an entry by its row id.
    pub async fn remove_by_id(&self, scope: BlacklistScope, id: Uuid) -> AppResult<bool> {
        let (company_id, event_id) = scope.columns();
        let result = sqlx::query(
            "DELETE FROM blacklisted_places WHERE id = $1 \
             AND company_id IS NOT DISTINCT FROM $2 AND event_id IS NOT DISTINCT FROM $3",
        )
        .bind(id)
        .bind(company_id)
        .bind(event_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to remove entry", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove an entry by its Google place id.
    pub async fn remove_by_place_id(&self, scope: BlacklistScope, place_id: &str) -> AppResult<bool> {
        let (company_id, event_id) = scope.columns();
        let result = sqlx::query(
            "DELETE FROM blacklisted_places WHERE place_id = $1 \
             AND company_id IS NOT DISTINCT FROM $2 AND event_id IS NOT DISTINCT FROM $3",
        )
        .bind(place_id)
        .bind(company_id)
        .bind(event_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to remove entry", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Place ids excluded for a company and, optionally, one of its events.
    pub async fn excluded_place_ids(
        &self,
        company_id: Uuid,
        event_id: Option<Uuid>,
    ) -> AppResult<Vec<String>> {
        sqlx::query_scalar(
            "SELECT DISTINCT place_id FROM blacklisted_places \
             WHERE company_id = $1 OR ($2::uuid IS NOT NULL AND event_id = $2)",
        )
        .bind(company_id)
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load blacklist", e))
    }
}
