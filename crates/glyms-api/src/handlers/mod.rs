//! Route handlers organized by domain.

pub mod auth;
pub mod company;
pub mod cron;
pub mod event;
pub mod feedback;
pub mod gamification;
pub mod health;
pub mod notification;
pub mod places;
pub mod preference;
pub mod tag;
pub mod team;
pub mod user;
