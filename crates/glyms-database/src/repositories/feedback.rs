//! Feedback repository implementation.

use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use glyms_core::error::{AppError, ErrorKind};
use glyms_core::result::AppResult;
use glyms_entity::feedback::{Feedback, UpsertFeedback};

/// A feedback row returned by an upsert.
#[derive(Debug, Clone, FromRow)]
pub struct UpsertedFeedback {
    #[sqlx(flatten)]
    pub feedback: Feedback,
    /// `true` if the row did not exist before.
    pub inserted: bool,
}

/// Repository for post-event feedback.
#[derive(Debug, Clone)]
pub struct FeedbackRepository {
    pool: PgPool,
}

impl FeedbackRepository {
    /// Create a new feedback repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert or replace a participant's feedback.
    pub async fn upsert(&self, data: &UpsertFeedback) -> AppResult<UpsertedFeedback> {
        sqlx::query_as::<_, UpsertedFeedback>(
            "INSERT INTO feedbacks (user_id, event_id, participated, rating, message) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (user_id, event_id) DO UPDATE SET \
                participated = EXCLUDED.participated, \
                rating = EXCLUDED.rating, \
                message = EXCLUDED.message \
             RETURNING *, (xmax = 0) AS inserted",
        )
        .bind(data.user_id)
        .bind(data.event_id)
        .bind(data.participated)
        .bind(data.rating)
        .bind(&data.message)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save feedback", e))
    }

    /// All feedback left for an event.
    pub async fn list_for_event(&self, event_id: Uuid) -> AppResult<Vec<Feedback>> {
        sqlx::query_as::<_, Feedback>(
            "SELECT * FROM feedbacks WHERE event_id = $1 ORDER BY created_at",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list feedback", e))
    }

    /// Ids of users who already left feedback for an event.
    pub async fn author_ids(&self, event_id: Uuid) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar("SELECT user_id FROM feedbacks WHERE event_id = $1")
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load feedback authors", e)
            })
    }
}
