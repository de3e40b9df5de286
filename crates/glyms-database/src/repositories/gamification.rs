//! Badge catalog and points ledger repositories.

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use glyms_core::error::{AppError, ErrorKind};
use glyms_core::result::AppResult;
use glyms_core::types::pagination::{PageRequest, PageResponse};
use glyms_entity::gamification::{Badge, BadgeWithStatus, PointsHistory};
use glyms_entity::notification::NotificationKind;

/// Repository for the static badge catalog and user unlocks.
#[derive(Debug, Clone)]
pub struct BadgeRepository {
    pool: PgPool,
}

impl BadgeRepository {
    /// Create a new badge repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The full catalog, cheapest first.
    pub async fn catalog(&self) -> AppResult<Vec<Badge>> {
        sqlx::query_as::<_, Badge>("SELECT * FROM badges ORDER BY points_required, name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list badges", e))
    }

    /// The catalog annotated with the user's unlock times.
    pub async fn catalog_for_user(&self, user_id: Uuid) -> AppResult<Vec<BadgeWithStatus>> {
        sqlx::query_as::<_, BadgeWithStatus>(
            "SELECT b.*, ub.unlocked_at FROM badges b \
             LEFT JOIN user_badges ub ON ub.badge_id = b.id AND ub.user_id = $1 \
             ORDER BY b.points_required, b.name",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list user badges", e))
    }

    /// Whether the user owns the badge.
    pub async fn has_unlocked(&self, user_id: Uuid, badge_id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM user_badges WHERE user_id = $1 AND badge_id = $2)",
        )
        .bind(user_id)
        .bind(badge_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check badge", e))
    }
}

/// Outcome of a points grant.
#[derive(Debug, Clone, Serialize)]
pub struct PointsGrant {
    /// The user's total after the grant.
    pub total: i32,
    /// Badges unlocked by this grant.
    pub unlocked: Vec<Badge>,
}

/// Repository for the points ledger.
#[derive(Debug, Clone)]
pub struct PointsRepository {
    pool: PgPool,
}

impl PointsRepository {
    /// Create a new points repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Add `points` to the user, record the grant, unlock every badge the
    /// new total satisfies, and notify the user for each unlock.
    ///
    /// Runs in one transaction holding the user row lock; unlock rows are
    /// inserted with `ON CONFLICT DO NOTHING`. A grant that would leave the
    /// total below zero is rejected and nothing is written.
    pub async fn grant(
        &self,
        user_id: Uuid,
        points: i32,
        reason: &str,
        unlock_message: impl Fn(&Badge) -> String,
    ) -> AppResult<PointsGrant> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let current: i32 = sqlx::query_scalar("SELECT points FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock user", e))?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let total = current.checked_add(points).ok_or_else(|| {
            AppError::validation("Point total would overflow")
        })?;
        if total < 0 {
            return Err(AppError::validation(format!(
                "Cannot remove {} points from a total of {current}",
                points.unsigned_abs()
            )));
        }

        sqlx::query("UPDATE users SET points = $2, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .bind(total)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update points", e))?;

        sqlx::query("INSERT INTO points_history (user_id, points, reason) VALUES ($1, $2, $3)")
            .bind(user_id)
            .bind(points)
            .bind(reason)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to record points", e)
            })?;

        let unlocked = sqlx::query_as::<_, Badge>(
            "WITH inserted AS ( \
                INSERT INTO user_badges (user_id, badge_id) \
                SELECT $1, b.id FROM badges b WHERE b.points_required <= $2 \
                ON CONFLICT (user_id, badge_id) DO NOTHING \
                RETURNING badge_id \
             ) \
             SELECT b.* FROM badges b JOIN inserted i ON i.badge_id = b.id \
             ORDER BY b.points_required",
        )
        .bind(user_id)
        .bind(total)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to unlock badges", e))?;

        for badge in &unlocked {
            sqlx::query(
                "INSERT INTO notifications (user_id, message, notification_type) VALUES ($1, $2, $3)",
            )
            .bind(user_id)
            .bind(unlock_message(badge))
            .bind(NotificationKind::BadgeUnlocked.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to notify badge unlock", e)
            })?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit points", e))?;

        Ok(PointsGrant { total, unlocked })
    }

    /// A user's grants, newest first.
    pub async fn history(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<PointsHistory>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM points_history WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count history", e))?;

        let items = sqlx::query_as::<_, PointsHistory>(
            "SELECT * FROM points_history WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list history", e))?;

        Ok(PageResponse::new(items, page, total as u64))
    }
}
