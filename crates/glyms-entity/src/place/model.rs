//! Blacklisted place model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A Google place id excluded from suggestions.
///
/// Exactly one of `company_id` and `event_id` is set.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BlacklistedPlace {
    pub id: Uuid,
    pub place_id: String,
    pub company_id: Option<Uuid>,
    pub event_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Where a blacklist entry applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlacklistScope {
    /// Every event of the company.
    Company(Uuid),
    /// A single event.
    Event(Uuid),
}

impl BlacklistScope {
    /// `(company_id, event_id)` column values for this scope.
    pub fn columns(&self) -> (Option<Uuid>, Option<Uuid>) {
        match *self {
            Self::Company(id) => (Some(id), None),
            Self::Event(id) => (None, Some(id)),
        }
    }
}
