//! Account lifecycle: company registration, login, invitations, resets.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{info, warn};

use glyms_auth::{Claims, JwtEncoder, PasswordHasher, PasswordValidator, generate_token};
use glyms_core::config::AuthConfig;
use glyms_core::error::AppError;
use glyms_database::repositories::{
    CompanyRepository, InvitationRepository, PasswordResetRepository, UserRepository,
};
use glyms_entity::account::Invitation;
use glyms_entity::company::Company;
use glyms_entity::user::{CreateUser, User, UserRole};

use super::mail::{MailGateway, MailMessage};
use crate::context::RequestContext;

/// A freshly issued session.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

/// Input for company self-registration.
#[derive(Debug, Clone)]
pub struct RegisterCompany {
    pub company_name: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Handles authentication and account creation flows.
#[derive(Debug, Clone)]
pub struct AuthService {
    company_repo: Arc<CompanyRepository>,
    user_repo: Arc<UserRepository>,
    invitation_repo: Arc<InvitationRepository>,
    reset_repo: Arc<PasswordResetRepository>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    encoder: Arc<JwtEncoder>,
    mail: Arc<dyn MailGateway>,
    config: AuthConfig,
}

impl AuthService {
    /// Creates a new auth service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        company_repo: Arc<CompanyRepository>,
        user_repo: Arc<UserRepository>,
        invitation_repo: Arc<InvitationRepository>,
        reset_repo: Arc<PasswordResetRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
        mail: Arc<dyn MailGateway>,
        config: AuthConfig,
    ) -> Self {
        Self {
            company_repo,
            user_repo,
            invitation_repo,
            reset_repo,
            hasher,
            validator,
            encoder,
            mail,
            config,
        }
    }

    /// Register a company together with its first administrator.
    pub async fn register_company(&self, input: RegisterCompany) -> Result<(Company, Session), AppError> {
        self.validator.validate(&input.password)?;
        let password_hash = self.hasher.hash_password(&input.password)?;

        let admin = CreateUser {
            email: input.email.trim().to_lowercase(),
            password_hash,
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            role: UserRole::Admin,
            company_id: uuid::Uuid::nil(),
        };

        let (company, user) = self
            .company_repo
            .register(input.company_name.trim(), &admin)
            .await?;

        info!(company_id = %company.id, user_id = %user.id, "Company registered");

        let session = self.issue(user)?;
        Ok((company, session))
    }

    /// Verify credentials and issue a session token.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let user = self.user_repo.find_by_email(email.trim()).await?;

        let Some(user) = user else {
            warn!(email = %email, "Login failed: unknown email");
            return Err(AppError::authentication("Invalid email or password"));
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::authentication("Invalid email or password"));
        }

        info!(user_id = %user.id, "User logged in");
        self.issue(user)
    }

    /// Turn validated session claims into a request context.
    ///
    /// Role and company come from the stored account, so a demotion or a
    /// removal takes effect on the next request. A token whose account is
    /// gone, or moved to another company, is rejected with 401.
    pub async fn resolve_session(&self, claims: &Claims) -> Result<RequestContext, AppError> {
        let user = self
            .user_repo
            .find_by_id(claims.sub)
            .await?
            .filter(|user| user.company_id == claims.company_id)
            .ok_or_else(|| AppError::authentication("Session is no longer valid"))?;
        Ok(RequestContext::from_user(&user))
    }

    /// Load the caller's account.
    pub async fn current_user(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::authentication("Account no longer exists"))
    }

    /// Invite an email address into the caller's company (admin only).
    pub async fn invite(&self, ctx: &RequestContext, email: &str) -> Result<Invitation, AppError> {
        ctx.require_admin()?;
        let email = email.trim().to_lowercase();

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(format!("'{email}' already has an account")));
        }

        let token = generate_token();
        let expires_at = Utc::now() + Duration::hours(self.config.invitation_ttl_hours as i64);
        let invitation = self
            .invitation_repo
            .create(ctx.company_id, &email, &token, ctx.user_id, expires_at)
            .await?;

        self.mail
            .send(&MailMessage {
                to: email.clone(),
                subject: "You're invited to Glyms".into(),
                body: format!(
                    "You have been invited to join your team on Glyms.\n\
                     Use this invitation code to create your account: {token}\n\
                     The code expires on {expires_at}."
                ),
            })
            .await?;

        info!(invitation_id = %invitation.id, company_id = %ctx.company_id, "Invitation sent");
        Ok(invitation)
    }

    /// Accept an invitation and create the invitee's account.
    pub async fn accept_invitation(
        &self,
        token: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Session, AppError> {
        let invitation = self
            .invitation_repo
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Invitation not found"))?;

        if !invitation.is_usable_at(Utc::now()) {
            return Err(AppError::validation("Invitation is expired or already used"));
        }

        self.validator.validate(password)?;
        let password_hash = self.hasher.hash_password(password)?;

        let user = self
            .invitation_repo
            .accept(
                invitation.id,
                &CreateUser {
                    email: invitation.email.clone(),
                    password_hash,
                    first_name: first_name.trim().to_string(),
                    last_name: last_name.trim().to_string(),
                    role: UserRole::Standard,
                    company_id: invitation.company_id,
                },
            )
            .await?;

        info!(user_id = %user.id, company_id = %user.company_id, "Invitation accepted");
        self.issue(user)
    }

    /// Start a password reset. Unknown emails are accepted silently.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AppError> {
        let Some(user) = self.user_repo.find_by_email(email.trim()).await? else {
            info!("Password reset requested for unknown email");
            return Ok(());
        };

        let token = generate_token();
        let expires_at =
            Utc::now() + Duration::minutes(self.config.password_reset_ttl_minutes as i64);
        self.reset_repo.create(user.id, &token, expires_at).await?;

        self.mail
            .send(&MailMessage {
                to: user.email.clone(),
                subject: "Reset your Glyms password".into(),
                body: format!(
                    "Use this code to choose a new password: {token}\n\
                     It expires on {expires_at}. If you did not ask for it, ignore this message."
                ),
            })
            .await?;

        info!(user_id = %user.id, "Password reset token issued");
        Ok(())
    }

    /// Finish a password reset.
    pub async fn confirm_password_reset(&self, token: &str, new_password: &str) -> Result<(), AppError> {
        let reset = self
            .reset_repo
            .find(token)
            .await?
            .ok_or_else(|| AppError::validation("Invalid or expired reset token"))?;

        if reset.is_expired_at(Utc::now()) {
            return Err(AppError::validation("Invalid or expired reset token"));
        }

        self.validator.validate(new_password)?;
        let password_hash = self.hasher.hash_password(new_password)?;
        self.reset_repo.reset_password(reset.user_id, &password_hash).await?;

        info!(user_id = %reset.user_id, "Password reset completed");
        Ok(())
    }

    fn issue(&self, user: User) -> Result<Session, AppError> {
        let (token, expires_at) = self.encoder.issue(&user)?;
        Ok(Session {
            token,
            expires_at,
            user,
        })
    }
}
