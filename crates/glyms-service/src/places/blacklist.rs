//! Company- and event-level place blacklists.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use glyms_core::error::AppError;
use glyms_database::repositories::{BlacklistRepository, EventRepository};
use glyms_entity::place::{BlacklistScope, BlacklistedPlace};

use crate::context::RequestContext;
use crate::event::{ensure_can_manage, load_event};

/// Blacklist use cases.
///
/// Company entries are admin-only. Event entries are readable by every
/// member of the company and writable by the event creator or an admin.
#[derive(Debug, Clone)]
pub struct BlacklistService {
    blacklist_repo: Arc<BlacklistRepository>,
    event_repo: Arc<EventRepository>,
}

impl BlacklistService {
    /// Creates a new blacklist service.
    pub fn new(blacklist_repo: Arc<BlacklistRepository>, event_repo: Arc<EventRepository>) -> Self {
        Self {
            blacklist_repo,
            event_repo,
        }
    }

    pub async fn list_company(&self, ctx: &RequestContext) -> Result<Vec<BlacklistedPlace>, AppError> {
        ctx.require_admin()?;
        self.blacklist_repo.list(BlacklistScope::Company(ctx.company_id)).await
    }

    pub async fn add_company(&self, ctx: &RequestContext, place_id: &str) -> Result<BlacklistedPlace, AppError> {
        ctx.require_admin()?;
        self.add(ctx, BlacklistScope::Company(ctx.company_id), place_id).await
    }

    pub async fn remove_company(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        ctx.require_admin()?;
        if !self
            .blacklist_repo
            .remove_by_id(BlacklistScope::Company(ctx.company_id), id)
            .await?
        {
            return Err(AppError::not_found("Blacklist entry not found"));
        }
        Ok(())
    }

    pub async fn list_event(&self, ctx: &RequestContext, event_id: Uuid) -> Result<Vec<BlacklistedPlace>, AppError> {
        let event = load_event(&self.event_repo, ctx, event_id).await?;
        self.blacklist_repo.list(BlacklistScope::Event(event.id)).await
    }

    pub async fn add_event(
        &self,
        ctx: &RequestContext,
        event_id: Uuid,
        place_id: &str,
    ) -> Result<BlacklistedPlace, AppError> {
        let event = load_event(&self.event_repo, ctx, event_id).await?;
        ensure_can_manage(ctx, &event)?;
        self.add(ctx, BlacklistScope::Event(event.id), place_id).await
    }

    pub async fn remove_event(&self, ctx: &RequestContext, event_id: Uuid, place_id: &str) -> Result<(), AppError> {
        let event = load_event(&self.event_repo, ctx, event_id).await?;
        ensure_can_manage(ctx, &event)?;
        if !self
            .blacklist_repo
            .remove_by_place_id(BlacklistScope::Event(event.id), place_id)
            .await?
        {
            return Err(AppError::not_found("Blacklist entry not found"));
        }
        Ok(())
    }

    async fn add(
        &self,
        ctx: &RequestContext,
        scope: BlacklistScope,
        place_id: &str,
    ) -> Result<BlacklistedPlace, AppError> {
        let place_id = place_id.trim();
        if place_id.is_empty() {
            return Err(AppError::validation("Place id is required"));
        }
        let entry = self.blacklist_repo.add(scope, place_id).await?;
        info!(
            entry_id = %entry.id,
            scope = ?scope,
            user_id = %ctx.user_id,
            "Place blacklisted"
        );
        Ok(entry)
    }
}
