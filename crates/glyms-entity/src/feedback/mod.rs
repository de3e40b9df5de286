//! Post-event feedback entities.

pub mod model;

pub use model::{Feedback, FeedbackSummary, MAX_RATING, MIN_RATING, UpsertFeedback};
