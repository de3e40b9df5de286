//! Team handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use glyms_entity::team::Team;
use glyms_entity::user::UserSummary;

use crate::dto::request::NameRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/teams
pub async fn list_teams(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<ApiResponse<Vec<Team>>>> {
    let teams = state.team_service.list(&auth).await?;
    Ok(Json(ApiResponse::ok(teams)))
}

/// POST /api/teams
pub async fn create_team(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<NameRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Team>>)> {
    let team = state.team_service.create(&auth, &req.name).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(team))))
}

/// GET /api/teams/{id}
pub async fn get_team(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Team>>> {
    let team = state.team_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(team)))
}

/// PUT /api/teams/{id}
pub async fn rename_team(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<NameRequest>,
) -> ApiResult<Json<ApiResponse<Team>>> {
    let team = state.team_service.rename(&auth, id, &req.name).await?;
    Ok(Json(ApiResponse::ok(team)))
}

/// DELETE /api/teams/{id}
pub async fn delete_team(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.team_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Team deleted"))))
}

/// GET /api/teams/{id}/members
pub async fn team_members(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<UserSummary>>>> {
    let members = state.team_service.members(&auth, id).await?;
    Ok(Json(ApiResponse::ok(members)))
}
