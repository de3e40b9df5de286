//! Team CRUD and membership listing.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use glyms_core::error::AppError;
use glyms_database::repositories::{TeamRepository, UserRepository};
use glyms_entity::team::Team;
use glyms_entity::user::UserSummary;

use crate::context::RequestContext;

/// Team use cases. Writes are admin-only.
#[derive(Debug, Clone)]
pub struct TeamService {
    team_repo: Arc<TeamRepository>,
    user_repo: Arc<UserRepository>,
}

impl TeamService {
    /// Creates a new team service.
    pub fn new(team_repo: Arc<TeamRepository>, user_repo: Arc<UserRepository>) -> Self {
        Self {
            team_repo,
            user_repo,
        }
    }

    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<Team>, AppError> {
        self.team_repo.list(ctx.company_id).await
    }

    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Team, AppError> {
        self.team_repo
            .find(ctx.company_id, id)
            .await?
            .ok_or_else(|| AppError::not_found("Team not found"))
    }

    pub async fn create(&self, ctx: &RequestContext, name: &str) -> Result<Team, AppError> {
        ctx.require_admin()?;
        let team = self.team_repo.create(ctx.company_id, checked_name(name)?).await?;
        info!(team_id = %team.id, company_id = %ctx.company_id, "Team created");
        Ok(team)
    }

    pub async fn rename(&self, ctx: &RequestContext, id: Uuid, name: &str) -> Result<Team, AppError> {
        ctx.require_admin()?;
        self.team_repo.rename(ctx.company_id, id, checked_name(name)?).await
    }

    /// Delete a team; its members become unassigned.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        ctx.require_admin()?;
        if !self.team_repo.delete(ctx.company_id, id).await? {
            return Err(AppError::not_found("Team not found"));
        }
        info!(team_id = %id, company_id = %ctx.company_id, "Team deleted");
        Ok(())
    }

    pub async fn members(&self, ctx: &RequestContext, id: Uuid) -> Result<Vec<UserSummary>, AppError> {
        let team = self.get(ctx, id).await?;
        self.user_repo.list_by_team(team.id).await
    }
}

fn checked_name(name: &str) -> Result<&str, AppError> {
    let name = name.trim();
    if name.is_empty() {
        Err(AppError::validation("Team name is required"))
    } else {
        Ok(name)
    }
}
