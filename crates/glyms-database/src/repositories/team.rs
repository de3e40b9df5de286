//! Team repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use glyms_core::error::{AppError, ErrorKind};
use glyms_core::result::AppResult;
use glyms_entity::team::Team;

use super::is_unique_violation;

/// Repository for teams.
#[derive(Debug, Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    /// Create a new team repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List the teams of a company.
    pub async fn list(&self, company_id: Uuid) -> AppResult<Vec<Team>> {
        sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE company_id = $1 ORDER BY name")
            .bind(company_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list teams", e))
    }

    /// Find a team inside a company.
    pub async fn find(&self, company_id: Uuid, id: Uuid) -> AppResult<Option<Team>> {
        sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE id = $1 AND company_id = $2")
            .bind(id)
            .bind(company_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find team", e))
    }

    /// Create a team.
    pub async fn create(&self, company_id: Uuid, name: &str) -> AppResult<Team> {
        sqlx::query_as::<_, Team>(
            "INSERT INTO teams (company_id, name) VALUES ($1, $2) RETURNING *",
        )
        .bind(company_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_name_conflict(e, name))
    }

    /// Rename a team.
    pub async fn rename(&self, company_id: Uuid, id: Uuid, name: &str) -> AppResult<Team> {
        sqlx::query_as::<_, Team>(
            "UPDATE teams SET name = $3 WHERE id = $1 AND company_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(company_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_name_conflict(e, name))?
        .ok_or_else(|| AppError::not_found("Team not found"))
    }

    /// Delete a team; its members become team-less.
    pub async fn delete(&self, company_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1 AND company_id = $2")
            .bind(id)
            .bind(company_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete team", e))?;
        Ok(result.rows_affected() > 0)
    }
}

fn map_name_conflict(e: sqlx::Error, name: &str) -> AppError {
    if is_unique_violation(&e, "teams_company_name_key") {
        AppError::conflict(format!("Team '{name}' already exists"))
    } else {
        AppError::with_source(ErrorKind::Database, "Failed to save team", e)
    }
}
