//! Points, badges, and rewards.

pub mod service;

pub use service::{GamificationService, Reward};
