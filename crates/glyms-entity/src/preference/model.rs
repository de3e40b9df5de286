//! Preference entity model.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

/// Free-text Google Maps place types with the user's weight for each.
pub type GoogleMapsTags = BTreeMap<String, f64>;

/// One user's vote for one event. Keyed by `(user_id, event_id)`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventUserPreference {
    pub user_id: Uuid,
    pub event_id: Uuid,
    /// Preferred activity tag.
    pub tag_id: Uuid,
    /// Preferred day.
    pub preferred_date: NaiveDate,
    /// Optional weighted Google Maps tags.
    pub google_maps_tags: Option<Json<GoogleMapsTags>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data written by a preference upsert.
#[derive(Debug, Clone)]
pub struct UpsertPreference {
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub tag_id: Uuid,
    pub preferred_date: NaiveDate,
    pub google_maps_tags: Option<GoogleMapsTags>,
}
