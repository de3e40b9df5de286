//! Externally triggered notification sweeps.

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use tracing::info;

use glyms_service::SweepReport;

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::CronAuth;
use crate::state::AppState;

/// POST /api/cron/event-reminders
pub async fn event_reminders(
    State(state): State<AppState>,
    _cron: CronAuth,
) -> ApiResult<Json<ApiResponse<SweepReport>>> {
    let report = state.sweep_service.send_event_reminders(Utc::now()).await?;
    info!(
        events = report.events,
        sent = report.notifications_sent,
        "Event reminder sweep triggered over HTTP"
    );
    Ok(Json(ApiResponse::ok(report)))
}

/// POST /api/cron/feedback-requests
pub async fn feedback_requests(
    State(state): State<AppState>,
    _cron: CronAuth,
) -> ApiResult<Json<ApiResponse<SweepReport>>> {
    let report = state.sweep_service.send_feedback_requests(Utc::now()).await?;
    info!(
        events = report.events,
        sent = report.notifications_sent,
        "Feedback request sweep triggered over HTTP"
    );
    Ok(Json(ApiResponse::ok(report)))
}
