//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use glyms_core::error::AppError;
use glyms_entity::user::{User, UserRole};

/// Context for the current authenticated request.
///
/// Resolved from the session token against the stored account and passed into service methods so that
/// every operation knows *who* is acting and in *which* company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's company.
    pub company_id: Uuid,
    /// The user's current role.
    pub role: UserRole,
    /// The user's email.
    pub email: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, company_id: Uuid, role: UserRole, email: String) -> Self {
        Self {
            user_id,
            company_id,
            role,
            email,
            request_time: Utc::now(),
        }
    }

    /// Builds a context from the stored account.
    pub fn from_user(user: &User) -> Self {
        Self::new(user.id, user.company_id, user.role, user.email.clone())
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Fails with 403 unless the current user is an admin.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::authorization("Administrator role required"))
        }
    }
}
