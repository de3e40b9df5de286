//! Activity tag vocabulary.

pub mod model;

pub use model::Tag;
