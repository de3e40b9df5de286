//! In-process scheduler configuration.

use serde::{Deserialize, Serialize};

/// Cron scheduler configuration.
///
/// The notification sweeps are normally triggered over HTTP by an external
/// cron; enabling the worker runs the same sweeps inside the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the in-process scheduler is enabled.
    #[serde(default)]
    pub enabled: bool,
    /// Six-field cron expression for the event reminder sweep.
    #[serde(default = "default_reminder_schedule")]
    pub reminder_schedule: String,
    /// Six-field cron expression for the feedback request sweep.
    #[serde(default = "default_feedback_schedule")]
    pub feedback_schedule: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            reminder_schedule: default_reminder_schedule(),
            feedback_schedule: default_feedback_schedule(),
        }
    }
}

fn default_reminder_schedule() -> String {
    "0 0 8 * * *".to_string()
}

fn default_feedback_schedule() -> String {
    "0 0 18 * * *".to_string()
}
