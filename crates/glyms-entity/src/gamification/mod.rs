//! Points and badge entities.

pub mod badge;
pub mod points;

pub use badge::{Badge, BadgeWithStatus, UserBadge};
pub use points::PointsHistory;
