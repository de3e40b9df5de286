//! Notification inbox operations and fan-out helpers.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use glyms_core::error::AppError;
use glyms_core::types::pagination::{PageRequest, PageResponse};
use glyms_database::repositories::NotificationRepository;
use glyms_entity::notification::{CreateNotification, Notification, NotificationKind};

use crate::context::RequestContext;

/// Manages user notifications.
#[derive(Debug, Clone)]
pub struct NotificationService {
    notif_repo: Arc<NotificationRepository>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(notif_repo: Arc<NotificationRepository>) -> Self {
        Self { notif_repo }
    }

    /// Lists notifications for the current user.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        unread_only: bool,
        page: PageRequest,
    ) -> Result<PageResponse<Notification>, AppError> {
        self.notif_repo
            .find_by_user(ctx.user_id, unread_only, &page)
            .await
    }

    /// Gets the unread notification count.
    pub async fn unread_count(&self, ctx: &RequestContext) -> Result<i64, AppError> {
        self.notif_repo.count_unread(ctx.user_id).await
    }

    /// Marks one notification as read.
    pub async fn mark_read(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        if self.notif_repo.mark_read(id, ctx.user_id).await? {
            Ok(())
        } else {
            Err(AppError::not_found("Notification not found"))
        }
    }

    /// Marks all notifications as read for the current user.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> Result<u64, AppError> {
        self.notif_repo.mark_all_read(ctx.user_id).await
    }

    /// Deletes one notification.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        if self.notif_repo.delete(id, ctx.user_id).await? {
            Ok(())
        } else {
            Err(AppError::not_found("Notification not found"))
        }
    }

    /// Sends one notification.
    pub async fn notify(
        &self,
        user_id: Uuid,
        kind: NotificationKind,
        message: impl Into<String>,
        event_id: Option<Uuid>,
    ) -> Result<Notification, AppError> {
        self.notif_repo
            .create(&CreateNotification {
                user_id,
                kind,
                message: message.into(),
                event_id,
            })
            .await
    }

    /// Sends the same notification to several users.
    pub async fn notify_all(
        &self,
        user_ids: &[Uuid],
        kind: NotificationKind,
        message: &str,
        event_id: Option<Uuid>,
    ) -> Result<usize, AppError> {
        for user_id in user_ids {
            self.notify(*user_id, kind, message, event_id).await?;
        }
        debug!(kind = %kind, recipients = user_ids.len(), "Notifications sent");
        Ok(user_ids.len())
    }
}
