//! Badge catalog and points handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use glyms_core::types::pagination::PageResponse;
use glyms_database::repositories::PointsGrant;
use glyms_entity::gamification::{BadgeWithStatus, PointsHistory};

use crate::dto::request::GrantPointsRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// GET /api/badges
pub async fn list_badges(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<BadgeWithStatus>>>> {
    let badges = state.gamification_service.badges(&auth).await?;
    Ok(Json(ApiResponse::ok(badges)))
}

/// GET /api/points/history
pub async fn points_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<ApiResponse<PageResponse<PointsHistory>>>> {
    let page = state
        .gamification_service
        .history(&auth, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// POST /api/points
pub async fn grant_points(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<GrantPointsRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<PointsGrant>>)> {
    let grant = state
        .gamification_service
        .grant_manual(&auth, req.user_id, req.points, &req.reason)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(grant))))
}
