//! Outbound mail port.

use async_trait::async_trait;
use tracing::{debug, info};

use glyms_core::result::AppResult;

/// A plain-text message to one recipient.
#[derive(Debug, Clone)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Delivers outbound mail.
#[async_trait]
pub trait MailGateway: Send + Sync + std::fmt::Debug {
    /// Send one message.
    async fn send(&self, message: &MailMessage) -> AppResult<()>;
}

/// Gateway that writes messages to the log instead of delivering them.
#[derive(Debug, Clone, Default)]
pub struct LoggingMailGateway;

#[async_trait]
impl MailGateway for LoggingMailGateway {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        info!(to = %message.to, subject = %message.subject, "Outbound mail (not delivered)");
        debug!(body = %message.body, "Outbound mail body");
        Ok(())
    }
}
