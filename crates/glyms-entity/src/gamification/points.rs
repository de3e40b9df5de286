//! Points audit log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One point grant.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PointsHistory {
    pub id: Uuid,
    pub user_id: Uuid,
    pub points: i32,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}
