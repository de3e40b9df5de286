//! `CronAuth` extractor for the externally triggered sweeps.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};

use glyms_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Proof that the caller presented the cron secret.
#[derive(Debug, Clone, Copy)]
pub struct CronAuth;

impl FromRequestParts<AppState> for CronAuth {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if !state.cron_secret.is_configured() {
            return Err(AppError::authorization("Cron endpoints are disabled").into());
        }

        let header = parts
            .headers
            .typed_get::<Authorization<Bearer>>()
            .ok_or_else(|| AppError::authentication("Missing cron credentials"))?;

        if !state.cron_secret.verify(header.token()) {
            tracing::warn!("Rejected cron call with a wrong secret");
            return Err(AppError::authentication("Invalid cron credentials").into());
        }
        Ok(CronAuth)
    }
}
