//! Preference (vote) handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use glyms_entity::preference::EventUserPreference;

use crate::dto::request::PreferenceRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/events/{id}/preferences/me
pub async fn my_preference(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<EventUserPreference>>> {
    let pref = state.preference_service.mine(&auth, event_id).await?;
    Ok(Json(ApiResponse::ok(pref)))
}

/// PUT /api/events/{id}/preferences/me
pub async fn upsert_preference(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<PreferenceRequest>,
) -> ApiResult<Json<ApiResponse<EventUserPreference>>> {
    let pref = state.preference_service.upsert(&auth, event_id, req.into()).await?;
    Ok(Json(ApiResponse::ok(pref)))
}

/// GET /api/events/{id}/preferences
pub async fn list_preferences(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<EventUserPreference>>>> {
    let prefs = state.preference_service.list(&auth, event_id).await?;
    Ok(Json(ApiResponse::ok(prefs)))
}
