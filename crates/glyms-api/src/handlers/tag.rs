//! Tag handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use glyms_entity::tag::Tag;

use crate::dto::request::NameRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/tags
pub async fn list_tags(State(state): State<AppState>, _auth: AuthUser) -> ApiResult<Json<ApiResponse<Vec<Tag>>>> {
    let tags = state.tag_service.list().await?;
    Ok(Json(ApiResponse::ok(tags)))
}

/// POST /api/tags
pub async fn create_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<NameRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Tag>>)> {
    let tag = state.tag_service.create(&auth, &req.name).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(tag))))
}
