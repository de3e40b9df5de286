//! Feedback entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lowest accepted rating.
pub const MIN_RATING: i16 = 1;
/// Highest accepted rating.
pub const MAX_RATING: i16 = 5;

/// One participant's feedback for one event. Keyed by `(user_id, event_id)`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Feedback {
    pub user_id: Uuid,
    pub event_id: Uuid,
    /// Whether the user actually attended.
    pub participated: bool,
    /// Rating in `1..=5`.
    pub rating: Option<i16>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data written by a feedback upsert.
#[derive(Debug, Clone)]
pub struct UpsertFeedback {
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub participated: bool,
    pub rating: Option<i16>,
    pub message: Option<String>,
}

/// Aggregate over an event's feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSummary {
    pub count: usize,
    pub participated_count: usize,
    /// Mean of the non-null ratings; `None` when nobody rated.
    pub average_rating: Option<f64>,
}

impl FeedbackSummary {
    /// Summarize a set of feedback rows.
    pub fn from_rows(rows: &[Feedback]) -> Self {
        let ratings: Vec<f64> = rows.iter().filter_map(|f| f.rating).map(f64::from).collect();
        let average_rating = if ratings.is_empty() {
            None
        } else {
            Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
        };
        Self {
            count: rows.len(),
            participated_count: rows.iter().filter(|f| f.participated).count(),
            average_rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(participated: bool, rating: Option<i16>) -> Feedback {
        Feedback {
            user_id: Uuid::new_v4(),
            event_id: Uuid::nil(),
            participated,
            rating,
            message: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_summary_ignores_missing_ratings() {
        let rows = vec![row(true, Some(5)), row(true, Some(2)), row(false, None)];
        let summary = FeedbackSummary::from_rows(&rows);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.participated_count, 2);
        assert_eq!(summary.average_rating, Some(3.5));
    }

    #[test]
    fn test_summary_of_nothing() {
        let summary = FeedbackSummary::from_rows(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average_rating, None);
    }
}
