//! Job executor: dispatches jobs to registered handlers.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use glyms_core::error::AppError;

/// Trait for job handler implementations
#[async_trait]
pub trait JobHandler: Send + Sync + std::fmt::Debug {
    /// Get the job type this handler processes
    fn job_type(&self) -> &str;

    /// Run the job as of `now` and return a JSON report
    async fn execute(&self, now: DateTime<Utc>) -> Result<Value, JobExecutionError>;
}

/// Error from job execution
#[derive(Debug, thiserror::Error)]
pub enum JobExecutionError {
    /// Nothing handles this job type
    #[error("Unknown job type: {0}")]
    UnknownJob(String),

    /// The underlying service failed
    #[error("Job failed: {0}")]
    Failed(#[from] AppError),
}

/// Dispatches jobs to the appropriate handler based on job type
#[derive(Debug, Default)]
pub struct JobExecutor {
    handlers: HashMap<String, Arc<dyn JobHandler>>,
}

impl JobExecutor {
    /// Create an empty executor
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a job handler
    pub fn register(&mut self, handler: Arc<dyn JobHandler>) {
        let job_type = handler.job_type().to_string();
        tracing::info!(job_type = %job_type, "Registered job handler");
        self.handlers.insert(job_type, handler);
    }

    /// Whether a handler exists for `job_type`
    pub fn handles(&self, job_type: &str) -> bool {
        self.handlers.contains_key(job_type)
    }

    /// Execute a job by dispatching to the correct handler
    pub async fn execute(&self, job_type: &str, now: DateTime<Utc>) -> Result<Value, JobExecutionError> {
        let handler = self
            .handlers
            .get(job_type)
            .ok_or_else(|| JobExecutionError::UnknownJob(job_type.to_string()))?;

        let started = std::time::Instant::now();
        let result = handler.execute(now).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(report) => tracing::info!(job_type, elapsed_ms, report = %report, "Job completed"),
            Err(e) => tracing::error!(job_type, elapsed_ms, error = %e, "Job failed"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug)]
    struct Echo;

    #[async_trait]
    impl JobHandler for Echo {
        fn job_type(&self) -> &str {
            "echo"
        }

        async fn execute(&self, now: DateTime<Utc>) -> Result<Value, JobExecutionError> {
            Ok(json!({ "at": now.to_rfc3339() }))
        }
    }

    #[tokio::test]
    async fn test_dispatches_by_type() {
        let mut executor = JobExecutor::new();
        executor.register(Arc::new(Echo));
        assert!(executor.handles("echo"));

        let now = Utc::now();
        let report = executor.execute("echo", now).await.unwrap();
        assert_eq!(report["at"], now.to_rfc3339());
    }

    #[tokio::test]
    async fn test_unknown_job_type() {
        let executor = JobExecutor::new();
        let err = executor.execute("missing", Utc::now()).await.unwrap_err();
        assert!(matches!(err, JobExecutionError::UnknownJob(t) if t == "missing"));
    }
}
