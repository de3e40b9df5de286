//! Notification sweep jobs.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use glyms_service::SweepService;

use crate::executor::{JobExecutionError, JobHandler};

/// Job type of the reminder sweep.
pub const EVENT_REMINDERS: &str = "event_reminders";
/// Job type of the feedback request sweep.
pub const FEEDBACK_REQUESTS: &str = "feedback_requests";

/// Sends `EVENT_REMINDER` notifications for upcoming events.
#[derive(Debug)]
pub struct EventReminderJob {
    sweep: Arc<SweepService>,
}

impl EventReminderJob {
    pub fn new(sweep: Arc<SweepService>) -> Self {
        Self { sweep }
    }
}

#[async_trait]
impl JobHandler for EventReminderJob {
    fn job_type(&self) -> &str {
        EVENT_REMINDERS
    }

    async fn execute(&self, now: DateTime<Utc>) -> Result<Value, JobExecutionError> {
        let report = self.sweep.send_event_reminders(now).await?;
        Ok(serde_json::json!(report))
    }
}

/// Sends `FEEDBACK_REQUEST` notifications for recently ended events.
#[derive(Debug)]
pub struct FeedbackRequestJob {
    sweep: Arc<SweepService>,
}

impl FeedbackRequestJob {
    pub fn new(sweep: Arc<SweepService>) -> Self {
        Self { sweep }
    }
}

#[async_trait]
impl JobHandler for FeedbackRequestJob {
    fn job_type(&self) -> &str {
        FEEDBACK_REQUESTS
    }

    async fn execute(&self, now: DateTime<Utc>) -> Result<Value, JobExecutionError> {
        let report = self.sweep.send_feedback_requests(now).await?;
        Ok(serde_json::json!(report))
    }
}
