//! Scheduled tasks for Glyms.
//!
//! The notification sweeps are normally triggered over HTTP by an external
//! cron. This crate can run the same sweeps in-process:
//! - a job executor that dispatches a named job to its handler
//! - a cron scheduler that fires jobs on six-field cron expressions
//! - handlers for the event reminder and feedback request sweeps

pub mod executor;
pub mod jobs;
pub mod scheduler;

pub use executor::{JobExecutionError, JobExecutor, JobHandler};
pub use scheduler::CronScheduler;
