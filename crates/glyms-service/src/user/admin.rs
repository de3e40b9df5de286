//! Admin user management: listing, roles, teams, removal.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use glyms_core::error::AppError;
use glyms_database::repositories::{TeamRepository, UserRepository};
use glyms_entity::user::{User, UserRole, UserSummary};

use crate::context::RequestContext;

/// Handles administrative user management operations.
#[derive(Debug, Clone)]
pub struct AdminUserService {
    user_repo: Arc<UserRepository>,
    team_repo: Arc<TeamRepository>,
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(user_repo: Arc<UserRepository>, team_repo: Arc<TeamRepository>) -> Self {
        Self {
            user_repo,
            team_repo,
        }
    }

    /// Every user of the caller's company.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<UserSummary>, AppError> {
        ctx.require_admin()?;
        self.user_repo.list_by_company(ctx.company_id).await
    }

    /// Changes a colleague's role. Admins cannot change their own role.
    pub async fn set_role(&self, ctx: &RequestContext, user_id: Uuid, role: UserRole) -> Result<User, AppError> {
        ctx.require_admin()?;
        if user_id == ctx.user_id {
            return Err(AppError::validation("You cannot change your own role"));
        }
        let target = self.find_colleague(ctx, user_id).await?;
        let user = self.user_repo.set_role(target.id, role).await?;

        info!(
            user_id = %user.id,
            admin_id = %ctx.user_id,
            role = %role,
            "User role changed"
        );
        Ok(user)
    }

    /// Assigns a colleague to a team of the same company, or unassigns.
    pub async fn assign_team(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        team_id: Option<Uuid>,
    ) -> Result<User, AppError> {
        ctx.require_admin()?;
        let target = self.find_colleague(ctx, user_id).await?;
        if let Some(team_id) = team_id {
            self.team_repo
                .find(ctx.company_id, team_id)
                .await?
                .ok_or_else(|| AppError::not_found("Team not found"))?;
        }
        let user = self.user_repo.set_team(target.id, team_id).await?;
        info!(user_id = %user.id, team_id = ?team_id, "User team changed");
        Ok(user)
    }

    /// Removes a colleague. Admins cannot remove themselves.
    pub async fn remove(&self, ctx: &RequestContext, user_id: Uuid) -> Result<(), AppError> {
        ctx.require_admin()?;
        if user_id == ctx.user_id {
            return Err(AppError::validation("You cannot remove your own account"));
        }
        let target = self.find_colleague(ctx, user_id).await?;
        self.user_repo.delete(target.id).await?;
        info!(user_id = %target.id, admin_id = %ctx.user_id, "User removed");
        Ok(())
    }

    async fn find_colleague(&self, ctx: &RequestContext, user_id: Uuid) -> Result<User, AppError> {
        self.user_repo
            .find_in_company(ctx.company_id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
