//! Feedback handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use glyms_entity::feedback::Feedback;
use glyms_service::feedback::FeedbackReport;

use crate::dto::request::FeedbackRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/events/{id}/feedback
pub async fn feedback_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<FeedbackReport>>> {
    let report = state.feedback_service.report(&auth, event_id).await?;
    Ok(Json(ApiResponse::ok(report)))
}

/// POST /api/events/{id}/feedback
pub async fn submit_feedback(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<FeedbackRequest>,
) -> ApiResult<Json<ApiResponse<Feedback>>> {
    let feedback = state.feedback_service.submit(&auth, event_id, req.into()).await?;
    Ok(Json(ApiResponse::ok(feedback)))
}
