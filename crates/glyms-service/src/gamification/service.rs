//! Points grants and badge selection.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use glyms_core::config::GamificationConfig;
use glyms_core::error::AppError;
use glyms_core::types::pagination::{PageRequest, PageResponse};
use glyms_database::repositories::{BadgeRepository, PointsGrant, PointsRepository, UserRepository};
use glyms_entity::gamification::{Badge, BadgeWithStatus, PointsHistory};
use glyms_entity::user::User;

use crate::context::RequestContext;

/// Largest single manual grant, in either direction.
const MAX_MANUAL_GRANT: i32 = 10_000;

/// Actions that earn points automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reward {
    /// Joined an event.
    JoinEvent,
    /// First preference for an event.
    Preference,
    /// First feedback for an event.
    Feedback,
}

impl Reward {
    /// Points for this reward under `config`.
    pub fn points(&self, config: &GamificationConfig) -> i32 {
        match self {
            Self::JoinEvent => config.join_event_points,
            Self::Preference => config.preference_points,
            Self::Feedback => config.feedback_points,
        }
    }

    /// Reason written to the points history.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::JoinEvent => "Joined an event",
            Self::Preference => "Shared event preferences",
            Self::Feedback => "Left event feedback",
        }
    }
}

fn unlock_message(badge: &Badge) -> String {
    format!("You unlocked the \"{}\" badge!", badge.name)
}

/// Awards points and manages badges.
#[derive(Debug, Clone)]
pub struct GamificationService {
    points_repo: Arc<PointsRepository>,
    badge_repo: Arc<BadgeRepository>,
    user_repo: Arc<UserRepository>,
    config: GamificationConfig,
}

impl GamificationService {
    /// Creates a new gamification service.
    pub fn new(
        points_repo: Arc<PointsRepository>,
        badge_repo: Arc<BadgeRepository>,
        user_repo: Arc<UserRepository>,
        config: GamificationConfig,
    ) -> Self {
        Self {
            points_repo,
            badge_repo,
            user_repo,
            config,
        }
    }

    /// Grant the points of an automatic reward.
    pub async fn reward(&self, user_id: Uuid, reward: Reward) -> Result<PointsGrant, AppError> {
        let points = reward.points(&self.config);
        let grant = self
            .points_repo
            .grant(user_id, points, reward.reason(), unlock_message)
            .await?;
        log_grant(user_id, points, &grant);
        Ok(grant)
    }

    /// Admin grant to a user of the same company.
    pub async fn grant_manual(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        points: i32,
        reason: &str,
    ) -> Result<PointsGrant, AppError> {
        ctx.require_admin()?;
        if points == 0 || points.abs() > MAX_MANUAL_GRANT {
            return Err(AppError::validation(format!(
                "Points must be non-zero and at most {MAX_MANUAL_GRANT} in magnitude"
            )));
        }
        if reason.trim().is_empty() {
            return Err(AppError::validation("A reason is required"));
        }
        self.user_repo
            .find_in_company(ctx.company_id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let grant = self
            .points_repo
            .grant(user_id, points, reason.trim(), unlock_message)
            .await?;
        log_grant(user_id, points, &grant);
        Ok(grant)
    }

    /// The caller's points history.
    pub async fn history(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<PointsHistory>, AppError> {
        self.points_repo.history(ctx.user_id, &page).await
    }

    /// The badge catalog with the caller's unlocks.
    pub async fn badges(&self, ctx: &RequestContext) -> Result<Vec<BadgeWithStatus>, AppError> {
        self.badge_repo.catalog_for_user(ctx.user_id).await
    }

    /// Choose the displayed badge; only unlocked badges may be selected.
    pub async fn select_badge(
        &self,
        ctx: &RequestContext,
        badge_id: Option<Uuid>,
    ) -> Result<User, AppError> {
        if let Some(badge_id) = badge_id {
            if !self.badge_repo.has_unlocked(ctx.user_id, badge_id).await? {
                return Err(AppError::authorization("Badge is not unlocked"));
            }
        }
        self.user_repo.set_selected_badge(ctx.user_id, badge_id).await
    }
}

fn log_grant(user_id: Uuid, points: i32, grant: &PointsGrant) {
    info!(
        user_id = %user_id,
        points,
        total = grant.total,
        unlocked = grant.unlocked.len(),
        "Points granted"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reward_points_follow_config() {
        let config = GamificationConfig::default();
        assert_eq!(Reward::JoinEvent.points(&config), 10);
        assert_eq!(Reward::Preference.points(&config), 5);
        assert_eq!(Reward::Feedback.points(&config), 15);

        let custom = GamificationConfig {
            feedback_points: 40,
            ..GamificationConfig::default()
        };
        assert_eq!(Reward::Feedback.points(&custom), 40);
    }

    #[test]
    fn test_unlock_message() {
        let badge = Badge {
            id: Uuid::nil(),
            name: "Legend".into(),
            description: String::new(),
            icon: "crown".into(),
            points_required: 1000,
        };
        assert_eq!(unlock_message(&badge), "You unlocked the \"Legend\" badge!");
    }
}
