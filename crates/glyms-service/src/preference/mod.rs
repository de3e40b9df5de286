//! Per-event activity and date votes.

pub mod service;

pub use service::{PreferenceInput, PreferenceService};
