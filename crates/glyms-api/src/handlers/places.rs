//! Google Maps proxy and event blacklist handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use glyms_entity::place::BlacklistedPlace;
use glyms_service::places::{GeocodeResult, Place};

use crate::dto::request::{BlacklistRequest, GeocodeQuery, NearbyQuery};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/places/nearby
pub async fn nearby(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<NearbyQuery>,
) -> ApiResult<Json<ApiResponse<Vec<Place>>>> {
    let places = state.places_service.nearby(&auth, query.into()).await?;
    Ok(Json(ApiResponse::ok(places)))
}

/// GET /api/places/geocode
pub async fn geocode(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<GeocodeQuery>,
) -> ApiResult<Json<ApiResponse<Vec<GeocodeResult>>>> {
    let results = state.places_service.geocode(&query.address).await?;
    Ok(Json(ApiResponse::ok(results)))
}

/// GET /api/events/{id}/blacklisted-places
pub async fn list_event_blacklist(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<BlacklistedPlace>>>> {
    let places = state.blacklist_service.list_event(&auth, event_id).await?;
    Ok(Json(ApiResponse::ok(places)))
}

/// POST /api/events/{id}/blacklisted-places
pub async fn add_event_blacklist(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<BlacklistRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<BlacklistedPlace>>)> {
    let place = state
        .blacklist_service
        .add_event(&auth, event_id, &req.place_id)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(place))))
}

/// DELETE /api/events/{id}/blacklisted-places/{place_id}
pub async fn remove_event_blacklist(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((event_id, place_id)): Path<(Uuid, String)>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state
        .blacklist_service
        .remove_event(&auth, event_id, &place_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Place removed from blacklist"))))
}
