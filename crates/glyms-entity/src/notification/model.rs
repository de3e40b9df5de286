//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::NotificationKind;

/// A notification delivered to a user's inbox.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The recipient user.
    pub user_id: Uuid,
    /// Notification body text.
    pub message: String,
    /// One of the [`NotificationKind`] string values.
    pub notification_type: String,
    /// Whether the user has read this notification.
    pub read: bool,
    /// Related event, if any.
    pub event_id: Option<Uuid>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to insert a notification.
#[derive(Debug, Clone)]
pub struct CreateNotification {
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub event_id: Option<Uuid>,
}
