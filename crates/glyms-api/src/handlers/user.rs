//! User handlers: own profile and company user administration.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use glyms_entity::user::{User, UserSummary};

use crate::dto::request::{
    AssignTeamRequest, ChangePasswordRequest, SelectBadgeRequest, SetRoleRequest,
    UpdateProfileRequest,
};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/users/me
pub async fn get_profile(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<ApiResponse<User>>> {
    let user = state.user_service.profile(&auth).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// PUT /api/users/me
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<ApiResponse<User>>> {
    let user = state.user_service.update_profile(&auth, req.into()).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// PUT /api/users/me/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state
        .user_service
        .change_password(&auth, &req.current_password, &req.new_password)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Password changed"))))
}

/// PUT /api/users/me/onboarding
pub async fn complete_onboarding(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<User>>> {
    let user = state.user_service.complete_onboarding(&auth).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// PUT /api/users/me/badge
pub async fn select_badge(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<SelectBadgeRequest>,
) -> ApiResult<Json<ApiResponse<User>>> {
    let user = state.gamification_service.select_badge(&auth, req.badge_id).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<UserSummary>>>> {
    let users = state.admin_user_service.list(&auth).await?;
    Ok(Json(ApiResponse::ok(users)))
}

/// PUT /api/users/{id}/role
pub async fn set_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<SetRoleRequest>,
) -> ApiResult<Json<ApiResponse<User>>> {
    let user = state.admin_user_service.set_role(&auth, id, req.role).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// PUT /api/users/{id}/team
pub async fn assign_team(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<AssignTeamRequest>,
) -> ApiResult<Json<ApiResponse<User>>> {
    let user = state.admin_user_service.assign_team(&auth, id, req.team_id).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// DELETE /api/users/{id}
pub async fn remove_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.admin_user_service.remove(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("User removed"))))
}
