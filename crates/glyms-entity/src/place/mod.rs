//! Blacklisted Google place entities.

pub mod model;

pub use model::{BlacklistScope, BlacklistedPlace};
