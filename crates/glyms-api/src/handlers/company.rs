//! Company handlers: own company, invitations, company blacklist.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use glyms_entity::account::Invitation;
use glyms_entity::company::Company;
use glyms_entity::place::BlacklistedPlace;

use crate::dto::request::{BlacklistRequest, InviteRequest, NameRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/companies/me
pub async fn get_company(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<ApiResponse<Company>>> {
    let company = state.company_service.get(&auth).await?;
    Ok(Json(ApiResponse::ok(company)))
}

/// PUT /api/companies/me
pub async fn rename_company(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<NameRequest>,
) -> ApiResult<Json<ApiResponse<Company>>> {
    let company = state.company_service.rename(&auth, &req.name).await?;
    Ok(Json(ApiResponse::ok(company)))
}

/// POST /api/companies/me/invitations
pub async fn invite(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<InviteRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Invitation>>)> {
    let invitation = state.auth_service.invite(&auth, &req.email).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(invitation))))
}

/// GET /api/companies/me/blacklisted-places
pub async fn list_blacklist(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<BlacklistedPlace>>>> {
    let places = state.blacklist_service.list_company(&auth).await?;
    Ok(Json(ApiResponse::ok(places)))
}

/// POST /api/companies/me/blacklisted-places
pub async fn add_blacklist(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<BlacklistRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<BlacklistedPlace>>)> {
    let place = state.blacklist_service.add_company(&auth, &req.place_id).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(place))))
}

/// DELETE /api/companies/me/blacklisted-places/{id}
pub async fn remove_blacklist(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.blacklist_service.remove_company(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Place removed from blacklist"))))
}
