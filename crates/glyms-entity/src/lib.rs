//! # glyms-entity
//!
//! Domain entity models for Glyms. Every struct in this crate represents a
//! database table row or a domain value object. Row types derive
//! `sqlx::FromRow`; enums stored in PostgreSQL derive `sqlx::Type`.

pub mod account;
pub mod company;
pub mod event;
pub mod feedback;
pub mod gamification;
pub mod notification;
pub mod place;
pub mod preference;
pub mod tag;
pub mod team;
pub mod user;
