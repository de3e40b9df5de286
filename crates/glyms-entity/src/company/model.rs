//! Company entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A tenant: every user, team, and event belongs to exactly one company.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    /// Unique company identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// When the company registered.
    pub created_at: DateTime<Utc>,
}
