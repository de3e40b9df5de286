//! Preference repository implementation.

use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use glyms_core::error::{AppError, ErrorKind};
use glyms_core::result::AppResult;
use glyms_entity::preference::{EventUserPreference, UpsertPreference};

/// A preference row returned by an upsert.
#[derive(Debug, Clone, FromRow)]
pub struct UpsertedPreference {
    #[sqlx(flatten)]
    pub preference: EventUserPreference,
    /// `true` if the row did not exist before.
    pub inserted: bool,
}

/// Repository for event preferences (votes).
#[derive(Debug, Clone)]
pub struct PreferenceRepository {
    pool: PgPool,
}

impl PreferenceRepository {
    /// Create a new preference repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert or replace the caller's vote for an event.
    pub async fn upsert(&self, data: &UpsertPreference) -> AppResult<UpsertedPreference> {
        sqlx::query_as::<_, UpsertedPreference>(
            "INSERT INTO event_user_preferences \
                (user_id, event_id, tag_id, preferred_date, google_maps_tags) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (user_id, event_id) DO UPDATE SET \
                tag_id = EXCLUDED.tag_id, \
                preferred_date = EXCLUDED.preferred_date, \
                google_maps_tags = EXCLUDED.google_maps_tags, \
                updated_at = NOW() \
             RETURNING *, (xmax = 0) AS inserted",
        )
        .bind(data.user_id)
        .bind(data.event_id)
        .bind(data.tag_id)
        .bind(data.preferred_date)
        .bind(data.google_maps_tags.clone().map(Json))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save preference", e))
    }

    /// The caller's vote for an event.
    pub async fn find(&self, user_id: Uuid, event_id: Uuid) -> AppResult<Option<EventUserPreference>> {
        sqlx::query_as::<_, EventUserPreference>(
            "SELECT * FROM event_user_preferences WHERE user_id = $1 AND event_id = $2",
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find preference", e))
    }

    /// Every vote cast for an event.
    pub async fn list_for_event(&self, event_id: Uuid) -> AppResult<Vec<EventUserPreference>> {
        sqlx::query_as::<_, EventUserPreference>(
            "SELECT * FROM event_user_preferences WHERE event_id = $1 ORDER BY created_at",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list preferences", e))
    }
}
