//! Session guard for the protected path prefixes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use glyms_core::error::AppError;

use crate::error::ApiError;
use crate::extractors::session_token;
use crate::state::AppState;

/// Rejects requests to protected prefixes that carry no valid session.
///
/// The resolved `RequestContext` is stored in the request extensions for
/// `AuthUser`, so role and company reflect the account as it is now.
pub async fn require_session(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let auth = &state.config.auth;
    if !auth.is_protected(request.uri().path()) {
        return next.run(request).await;
    }

    let Some(token) = session_token(request.headers(), &auth.cookie_name) else {
        return ApiError(AppError::authentication("Not signed in")).into_response();
    };

    let resolved = match state.jwt_decoder.decode(&token) {
        Ok(claims) => state.auth_service.resolve_session(&claims).await,
        Err(e) => Err(e),
    };

    match resolved {
        Ok(ctx) => {
            request.extensions_mut().insert(ctx);
            next.run(request).await
        }
        Err(e) => ApiError(e).into_response(),
    }
}
