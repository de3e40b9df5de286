//! Event preference (vote) entities.

pub mod model;

pub use model::{EventUserPreference, GoogleMapsTags, UpsertPreference};
