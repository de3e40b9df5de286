//! Notification type enumeration.

use serde::{Deserialize, Serialize};

/// The kinds of notification the system emits.
///
/// Stored as a plain string column; the literal values are part of the
/// client contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    /// A participant joined the recipient's event.
    #[serde(rename = "EVENT_INVITATION_ACCEPTED")]
    EventInvitationAccepted,
    /// The event ended; the recipient has not left feedback yet.
    #[serde(rename = "FEEDBACK_REQUEST")]
    FeedbackRequest,
    /// The event starts soon.
    #[serde(rename = "EVENT_REMINDER")]
    EventReminder,
    /// The event was confirmed with its final activity and date.
    #[serde(rename = "EVENT_CONFIRMED")]
    EventConfirmed,
    /// The event was cancelled.
    #[serde(rename = "EVENT_CANCELLED")]
    EventCancelled,
    /// A badge threshold was reached.
    #[serde(rename = "badge_unlocked")]
    BadgeUnlocked,
}

impl NotificationKind {
    /// Return the stored string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EventInvitationAccepted => "EVENT_INVITATION_ACCEPTED",
            Self::FeedbackRequest => "FEEDBACK_REQUEST",
            Self::EventReminder => "EVENT_REMINDER",
            Self::EventConfirmed => "EVENT_CONFIRMED",
            Self::EventCancelled => "EVENT_CANCELLED",
            Self::BadgeUnlocked => "badge_unlocked",
        }
    }

    /// Kinds that are sent at most once per `(user, event)`.
    pub fn is_deduplicated(&self) -> bool {
        matches!(self, Self::EventReminder | Self::FeedbackRequest)
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_matches_stored_value() {
        for kind in [
            NotificationKind::EventInvitationAccepted,
            NotificationKind::FeedbackRequest,
            NotificationKind::EventReminder,
            NotificationKind::EventConfirmed,
            NotificationKind::EventCancelled,
            NotificationKind::BadgeUnlocked,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }
}
