//! Built-in job handler implementations.

pub mod sweep;

pub use sweep::{EVENT_REMINDERS, EventReminderJob, FEEDBACK_REQUESTS, FeedbackRequestJob};
