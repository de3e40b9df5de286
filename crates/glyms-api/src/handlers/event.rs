//! Event handlers: CRUD, participation, lifecycle, and tallies.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use glyms_core::types::pagination::PageResponse;
use glyms_entity::event::{Event, EventDetails};
use glyms_service::event::FinalizeOutcome;
use glyms_service::tally::{DateTally, GoogleMapsTally, TagTally};

use crate::dto::request::{CreateEventRequest, EventListQuery, TransitionRequest, UpdateEventRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/events
pub async fn list_events(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<EventListQuery>,
) -> ApiResult<Json<ApiResponse<PageResponse<Event>>>> {
    let page = state
        .event_service
        .list(&auth, query.state, query.page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateEventRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<EventDetails>>)> {
    let event = state.event_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(event))))
}

/// GET /api/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<EventDetails>>> {
    let event = state.event_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(event)))
}

/// PUT /api/events/{id}
pub async fn update_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateEventRequest>,
) -> ApiResult<Json<ApiResponse<EventDetails>>> {
    let event = state.event_service.update(&auth, id, req.into()).await?;
    Ok(Json(ApiResponse::ok(event)))
}

/// DELETE /api/events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.event_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Event deleted"))))
}

/// POST /api/events/{id}/join
pub async fn join_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<EventDetails>>> {
    let event = state.event_service.join(&auth, id).await?;
    Ok(Json(ApiResponse::ok(event)))
}

/// POST /api/events/{id}/leave
pub async fn leave_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.event_service.leave(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Left event"))))
}

/// PUT /api/events/{id}/state
pub async fn transition_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<TransitionRequest>,
) -> ApiResult<Json<ApiResponse<Event>>> {
    let event = state.lifecycle_service.transition(&auth, id, req.state).await?;
    Ok(Json(ApiResponse::ok(event)))
}

/// POST /api/events/{id}/finalize
pub async fn finalize_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<FinalizeOutcome>>> {
    let outcome = state.lifecycle_service.finalize(&auth, id).await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

/// GET /api/events/{id}/popular-tag
pub async fn popular_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Option<TagTally>>>> {
    let tally = state.lifecycle_service.popular_tag(&auth, id).await?;
    Ok(Json(ApiResponse::ok(tally)))
}

/// GET /api/events/{id}/popular-date
pub async fn popular_date(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Option<DateTally>>>> {
    let tally = state.lifecycle_service.popular_date(&auth, id).await?;
    Ok(Json(ApiResponse::ok(tally)))
}

/// GET /api/events/{id}/google-maps-tags
pub async fn google_maps_tags(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<GoogleMapsTally>>> {
    let tally = state.lifecycle_service.google_maps_tags(&auth, id).await?;
    Ok(Json(ApiResponse::ok(tally)))
}
