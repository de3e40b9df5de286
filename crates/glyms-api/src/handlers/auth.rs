//! Auth handlers: register, login, logout, me, invitations, password reset.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use glyms_core::config::AuthConfig;
use glyms_entity::user::User;

use crate::dto::request::{
    AcceptInvitationRequest, LoginRequest, PasswordResetConfirmRequest, PasswordResetRequest,
    RegisterRequest,
};
use crate::dto::response::{ApiResponse, MessageResponse, RegisterResponse, SessionResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// Session cookie carrying `token`.
fn session_cookie(config: &AuthConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token))
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::hours(config.session_ttl_hours as i64))
        .build()
}

/// Removal cookie matching the session cookie's path.
fn cleared_cookie(config: &AuthConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), ""))
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, CookieJar, Json<ApiResponse<RegisterResponse>>)> {
    let (company, session) = state.auth_service.register_company(req.into()).await?;
    let jar = jar.add(session_cookie(&state.config.auth, session.token.clone()));

    Ok((
        StatusCode::CREATED,
        jar,
        Json(ApiResponse::ok(RegisterResponse {
            company,
            session: session.into(),
        })),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<ApiResponse<SessionResponse>>)> {
    let session = state.auth_service.login(&req.email, &req.password).await?;
    let jar = jar.add(session_cookie(&state.config.auth, session.token.clone()));
    Ok((jar, Json(ApiResponse::ok(session.into()))))
}

/// POST /api/auth/logout
///
/// Tokens are stateless; logging out only drops the cookie.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<MessageResponse>>) {
    let jar = jar.remove(cleared_cookie(&state.config.auth));
    (jar, Json(ApiResponse::ok(MessageResponse::new("Logged out"))))
}

/// GET /api/auth/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<ApiResponse<User>>> {
    let user = state.auth_service.current_user(&auth).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// POST /api/auth/invitations/accept
pub async fn accept_invitation(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<AcceptInvitationRequest>,
) -> ApiResult<(StatusCode, CookieJar, Json<ApiResponse<SessionResponse>>)> {
    let session = state
        .auth_service
        .accept_invitation(&req.token, &req.password, &req.first_name, &req.last_name)
        .await?;
    let jar = jar.add(session_cookie(&state.config.auth, session.token.clone()));
    Ok((StatusCode::CREATED, jar, Json(ApiResponse::ok(session.into()))))
}

/// POST /api/auth/password-reset/request
///
/// Answers the same way whether or not the email is known.
pub async fn request_password_reset(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<PasswordResetRequest>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.auth_service.request_password_reset(&req.email).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "If the address is registered, a reset code has been sent",
    ))))
}

/// POST /api/auth/password-reset/confirm
pub async fn confirm_password_reset(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<PasswordResetConfirmRequest>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state
        .auth_service
        .confirm_password_reset(&req.token, &req.new_password)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Password updated"))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let config = AuthConfig {
            cookie_secure: true,
            ..AuthConfig::default()
        };
        let cookie = session_cookie(&config, "tok".into());
        assert_eq!(cookie.name(), "glyms_session");
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(
            cookie.max_age(),
            Some(time::Duration::hours(config.session_ttl_hours as i64))
        );
    }
}
