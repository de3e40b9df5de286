//! Event entity model.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::state::EventState;
use crate::tag::Tag;
use crate::user::UserSummary;

/// A team-building event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    /// Unique event identifier.
    pub id: Uuid,
    /// Owning company.
    pub company_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Lifecycle state.
    pub state: EventState,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    /// Duration in minutes.
    pub duration: Option<i32>,
    pub city: Option<String>,
    /// Winning tag name written on confirmation.
    pub activity_type: Option<String>,
    /// Participant cap; `None` means unlimited.
    pub max_persons: Option<i32>,
    pub cost_per_person: Option<f64>,
    /// Creator and owner of the event.
    pub created_by_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Whether `user_id` created this event.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.created_by_id == user_id
    }

    /// Last day of the event: `end_date`, falling back to `start_date`.
    pub fn last_day(&self) -> Option<NaiveDate> {
        self.end_date.or(self.start_date)
    }
}

/// An event together with its tags and participants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDetails {
    #[serde(flatten)]
    pub event: Event,
    pub tags: Vec<Tag>,
    pub participants: Vec<UserSummary>,
}

/// Data required to create a new event.
#[derive(Debug, Clone)]
pub struct CreateEvent {
    pub company_id: Uuid,
    pub created_by_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub duration: Option<i32>,
    pub city: Option<String>,
    pub max_persons: Option<i32>,
    pub cost_per_person: Option<f64>,
}

/// Editable event fields. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub duration: Option<i32>,
    pub city: Option<String>,
    pub max_persons: Option<i32>,
    pub cost_per_person: Option<f64>,
}
