//! User self-service operations: profile, password, onboarding.

use std::sync::Arc;

use tracing::info;

use glyms_auth::{PasswordHasher, PasswordValidator};
use glyms_core::error::AppError;
use glyms_database::repositories::UserRepository;
use glyms_entity::user::{UpdateProfile, User};

use crate::context::RequestContext;

/// Handles user self-service operations.
#[derive(Debug, Clone)]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            validator,
        }
    }

    /// Gets the current user's full profile.
    pub async fn profile(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Updates the current user's profile fields.
    pub async fn update_profile(&self, ctx: &RequestContext, changes: UpdateProfile) -> Result<User, AppError> {
        let changes = UpdateProfile {
            first_name: non_blank(changes.first_name, "First name")?,
            last_name: non_blank(changes.last_name, "Last name")?,
            photo_url: changes.photo_url.map(|u| u.trim().to_string()),
            banner_url: changes.banner_url.map(|u| u.trim().to_string()),
        };
        let user = self.user_repo.update_profile(ctx.user_id, &changes).await?;
        info!(user_id = %ctx.user_id, "Profile updated");
        Ok(user)
    }

    /// Changes the current user's password.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user = self.profile(ctx).await?;

        if !self.hasher.verify_password(current_password, &user.password_hash)? {
            return Err(AppError::authentication("Current password is incorrect"));
        }

        self.validator.validate(new_password)?;
        self.validator.validate_not_same(current_password, new_password)?;

        let new_hash = self.hasher.hash_password(new_password)?;
        self.user_repo.update_password(ctx.user_id, &new_hash).await?;

        info!(user_id = %ctx.user_id, "Password changed");
        Ok(())
    }

    /// Marks onboarding as done.
    pub async fn complete_onboarding(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo.complete_onboarding(ctx.user_id).await
    }
}

fn non_blank(value: Option<String>, field: &str) -> Result<Option<String>, AppError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if v.is_empty() => Err(AppError::validation(format!("{field} cannot be empty"))),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(None, "x").unwrap(), None);
        assert_eq!(non_blank(Some(" Ada ".into()), "x").unwrap(), Some("Ada".into()));
        assert!(non_blank(Some("   ".into()), "x").is_err());
    }
}
