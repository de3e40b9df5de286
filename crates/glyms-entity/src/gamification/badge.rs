//! Badge catalog and unlock records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A catalog badge unlocked by reaching `points_required`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Badge {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub points_required: i32,
}

impl Badge {
    /// Whether a point total satisfies this badge.
    pub fn is_reached_by(&self, points: i32) -> bool {
        points >= self.points_required
    }
}

/// A badge a user has unlocked.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserBadge {
    pub user_id: Uuid,
    pub badge_id: Uuid,
    pub unlocked_at: DateTime<Utc>,
}

/// Catalog entry annotated for one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BadgeWithStatus {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub badge: Badge,
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl BadgeWithStatus {
    /// Whether the user owns this badge.
    pub fn unlocked(&self) -> bool {
        self.unlocked_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        let badge = Badge {
            id: Uuid::new_v4(),
            name: "Team Player".into(),
            description: "Reach 50 points".into(),
            icon: "users".into(),
            points_required: 50,
        };
        assert!(!badge.is_reached_by(49));
        assert!(badge.is_reached_by(50));
        assert!(badge.is_reached_by(51));
    }
}
