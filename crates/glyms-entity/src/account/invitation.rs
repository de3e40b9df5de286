//! Employee invitation model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An invitation for an email address to join a company.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Invitation {
    /// Unique invitation identifier.
    pub id: Uuid,
    /// Company the invitee will join.
    pub company_id: Uuid,
    /// Invited email address (lower-cased).
    pub email: String,
    /// Opaque acceptance token.
    #[serde(skip_serializing)]
    pub token: String,
    /// Admin who sent the invitation.
    pub invited_by: Uuid,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
    /// When the invitation was accepted.
    pub accepted_at: Option<DateTime<Utc>>,
    /// When the invitation was created.
    pub created_at: DateTime<Utc>,
}

impl Invitation {
    /// Whether the invitation can still be accepted at `now`.
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        self.accepted_at.is_none() && self.expires_at > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn invitation(expires_at: DateTime<Utc>, accepted_at: Option<DateTime<Utc>>) -> Invitation {
        Invitation {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            email: "new.hire@acme.test".into(),
            token: "tok".into(),
            invited_by: Uuid::new_v4(),
            expires_at,
            accepted_at,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_usable_until_expiry() {
        let now = Utc::now();
        assert!(invitation(now + Duration::hours(1), None).is_usable_at(now));
        assert!(!invitation(now - Duration::seconds(1), None).is_usable_at(now));
    }

    #[test]
    fn test_accepted_invitation_is_spent() {
        let now = Utc::now();
        assert!(!invitation(now + Duration::hours(1), Some(now)).is_usable_at(now));
    }
}
