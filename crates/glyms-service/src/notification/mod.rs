//! Notification inbox and the cron-driven sweeps.

pub mod service;
pub mod sweep;

pub use service::NotificationService;
pub use sweep::{SweepReport, SweepService};
