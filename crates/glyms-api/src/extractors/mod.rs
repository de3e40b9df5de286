//! Custom Axum extractors.

pub mod auth;
pub mod cron;
pub mod json;
pub mod pagination;

pub use auth::{AuthUser, session_token};
pub use cron::CronAuth;
pub use json::ValidatedJson;
pub use pagination::PaginationParams;
