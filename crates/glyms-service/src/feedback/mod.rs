//! Post-event feedback.

pub mod service;

pub use service::{FeedbackInput, FeedbackReport, FeedbackService};
