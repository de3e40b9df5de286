//! Invitation repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use glyms_core::error::{AppError, ErrorKind};
use glyms_core::result::AppResult;
use glyms_entity::account::Invitation;
use glyms_entity::user::{CreateUser, User};

use super::is_unique_violation;

/// Repository for company invitations.
#[derive(Debug, Clone)]
pub struct InvitationRepository {
    pool: PgPool,
}

impl InvitationRepository {
    /// Create a new invitation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a new invitation.
    pub async fn create(
        &self,
        company_id: Uuid,
        email: &str,
        token: &str,
        invited_by: Uuid,
        expires_at: DateTime<Utc>,
    ) -> AppResult<Invitation> {
        sqlx::query_as::<_, Invitation>(
            "INSERT INTO invitations (company_id, email, token, invited_by, expires_at) \
             VALUES ($1, LOWER($2), $3, $4, $5) RETURNING *",
        )
        .bind(company_id)
        .bind(email)
        .bind(token)
        .bind(invited_by)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create invitation", e))
    }

    /// Find an invitation by its token.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<Invitation>> {
        sqlx::query_as::<_, Invitation>("SELECT * FROM invitations WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find invitation", e))
    }

    /// Consume an invitation and create the invitee's account atomically.
    ///
    /// The invitation row is claimed with a conditional update so that two
    /// concurrent acceptances cannot both succeed.
    pub async fn accept(&self, invitation_id: Uuid, user: &CreateUser) -> AppResult<User> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let claimed = sqlx::query(
            "UPDATE invitations SET accepted_at = NOW() \
             WHERE id = $1 AND accepted_at IS NULL AND expires_at > NOW()",
        )
        .bind(invitation_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to claim invitation", e))?;

        if claimed.rows_affected() == 0 {
            return Err(AppError::validation("Invitation is expired or already used"));
        }

        let created = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash, first_name, last_name, role, company_id) \
             VALUES (LOWER($1), $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.role)
        .bind(user.company_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, "users_email_lower_key") {
                AppError::conflict(format!("Email '{}' is already registered", user.email))
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create invited user", e)
            }
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit invitation", e)
        })?;

        Ok(created)
    }
}
