//! Cron endpoint configuration.

use serde::{Deserialize, Serialize};

/// Settings for the externally triggered notification sweeps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CronConfig {
    /// Shared bearer secret expected on `/api/cron/*`. Empty disables the endpoints.
    #[serde(default)]
    pub secret: String,
    /// Events starting within this many hours get a reminder.
    #[serde(default = "default_lookahead")]
    pub reminder_lookahead_hours: i64,
    /// Events that ended at most this many days ago get feedback requests.
    #[serde(default = "default_lookback")]
    pub feedback_lookback_days: i64,
}

impl Default for CronConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            reminder_lookahead_hours: default_lookahead(),
            feedback_lookback_days: default_lookback(),
        }
    }
}

fn default_lookahead() -> i64 {
    24
}

fn default_lookback() -> i64 {
    7
}
