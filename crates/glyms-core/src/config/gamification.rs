//! Point values for gamified actions.

use serde::{Deserialize, Serialize};

/// Points granted per user action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamificationConfig {
    /// Joining an event.
    #[serde(default = "default_join")]
    pub join_event_points: i32,
    /// First preference submitted for an event.
    #[serde(default = "default_preference")]
    pub preference_points: i32,
    /// First feedback submitted for an event.
    #[serde(default = "default_feedback")]
    pub feedback_points: i32,
}

impl Default for GamificationConfig {
    fn default() -> Self {
        Self {
            join_event_points: default_join(),
            preference_points: default_preference(),
            feedback_points: default_feedback(),
        }
    }
}

fn default_join() -> i32 {
    10
}

fn default_preference() -> i32 {
    5
}

fn default_feedback() -> i32 {
    15
}
