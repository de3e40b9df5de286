//! Request DTOs with validation.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use glyms_core::types::pagination::PageRequest;
use glyms_entity::event::{EventState, UpdateEvent};
use glyms_entity::preference::GoogleMapsTags;
use glyms_entity::user::{UpdateProfile, UserRole};
use glyms_service::account::RegisterCompany;
use glyms_service::event::{EventChanges, NewEvent};
use glyms_service::feedback::FeedbackInput;
use glyms_service::places::NearbySearch;
use glyms_service::preference::PreferenceInput;

use crate::extractors::PaginationParams;

// ── Auth ─────────────────────────────────────────────────────

/// Company self-registration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 200, message = "Company name is required"))]
    pub company_name: String,
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: String,
}

impl From<RegisterRequest> for RegisterCompany {
    fn from(req: RegisterRequest) -> Self {
        Self {
            company_name: req.company_name,
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
        }
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Invitation acceptance.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AcceptInvitationRequest {
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: String,
}

/// Password reset request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PasswordResetRequest {
    #[validate(email(message = "Invalid email"))]
    pub email: String,
}

/// Password reset confirmation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PasswordResetConfirmRequest {
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub new_password: String,
}

// ── Users ────────────────────────────────────────────────────

/// Update profile request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    #[validate(url(message = "Invalid URL"))]
    pub photo_url: Option<String>,
    #[validate(url(message = "Invalid URL"))]
    pub banner_url: Option<String>,
}

impl From<UpdateProfileRequest> for UpdateProfile {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            photo_url: req.photo_url,
            banner_url: req.banner_url,
        }
    }
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

/// Displayed badge choice; `null` clears it.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SelectBadgeRequest {
    pub badge_id: Option<Uuid>,
}

/// Role change (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetRoleRequest {
    pub role: UserRole,
}

/// Team assignment (admin); `null` unassigns.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AssignTeamRequest {
    pub team_id: Option<Uuid>,
}

// ── Companies, teams, tags ───────────────────────────────────

/// A single `name` field, used by company, team, and tag writes.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NameRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1 to 200 characters"))]
    pub name: String,
}

/// Employee invitation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InviteRequest {
    #[validate(email(message = "Invalid email"))]
    pub email: String,
}

/// Blacklist entry.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BlacklistRequest {
    #[validate(length(min = 1, max = 512, message = "Place id is required"))]
    pub place_id: String,
}

// ── Events ───────────────────────────────────────────────────

/// Create event request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1 to 200 characters"))]
    pub title: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    /// Minutes.
    #[validate(range(min = 1))]
    pub duration: Option<i32>,
    #[validate(length(max = 200))]
    pub city: Option<String>,
    #[validate(range(min = 1, message = "Must allow at least one person"))]
    pub max_persons: Option<i32>,
    #[validate(range(min = 0.0, message = "Cost cannot be negative"))]
    pub cost_per_person: Option<f64>,
    #[serde(default)]
    pub tag_ids: Vec<Uuid>,
    #[serde(default)]
    pub participant_ids: Vec<Uuid>,
}

impl From<CreateEventRequest> for NewEvent {
    fn from(req: CreateEventRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            start_date: req.start_date,
            end_date: req.end_date,
            start_time: req.start_time,
            end_time: req.end_time,
            duration: req.duration,
            city: req.city,
            max_persons: req.max_persons,
            cost_per_person: req.cost_per_person,
            tag_ids: req.tag_ids,
            participant_ids: req.participant_ids,
        }
    }
}

/// Update event request. Absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1 to 200 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    #[validate(range(min = 1))]
    pub duration: Option<i32>,
    #[validate(length(max = 200))]
    pub city: Option<String>,
    #[validate(range(min = 1, message = "Must allow at least one person"))]
    pub max_persons: Option<i32>,
    #[validate(range(min = 0.0, message = "Cost cannot be negative"))]
    pub cost_per_person: Option<f64>,
    /// Replaces the tag set when present.
    pub tag_ids: Option<Vec<Uuid>>,
}

impl From<UpdateEventRequest> for EventChanges {
    fn from(req: UpdateEventRequest) -> Self {
        Self {
            fields: UpdateEvent {
                title: req.title,
                description: req.description,
                start_date: req.start_date,
                end_date: req.end_date,
                start_time: req.start_time,
                end_time: req.end_time,
                duration: req.duration,
                city: req.city,
                max_persons: req.max_persons,
                cost_per_person: req.cost_per_person,
            },
            tag_ids: req.tag_ids,
        }
    }
}

/// Event listing filters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventListQuery {
    pub state: Option<EventState>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl EventListQuery {
    pub fn page_request(&self) -> PageRequest {
        PaginationParams {
            page: self.page,
            page_size: self.page_size,
        }
        .into_page_request()
    }
}

/// State transition request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TransitionRequest {
    pub state: EventState,
}

/// Preference upsert.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PreferenceRequest {
    pub tag_id: Uuid,
    pub preferred_date: NaiveDate,
    pub google_maps_tags: Option<GoogleMapsTags>,
}

impl From<PreferenceRequest> for PreferenceInput {
    fn from(req: PreferenceRequest) -> Self {
        Self {
            tag_id: req.tag_id,
            preferred_date: req.preferred_date,
            google_maps_tags: req.google_maps_tags,
        }
    }
}

/// Feedback upsert.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FeedbackRequest {
    #[serde(default = "default_participated")]
    pub participated: bool,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i16>,
    #[validate(length(max = 2000))]
    pub message: Option<String>,
}

fn default_participated() -> bool {
    true
}

impl From<FeedbackRequest> for FeedbackInput {
    fn from(req: FeedbackRequest) -> Self {
        Self {
            participated: req.participated,
            rating: req.rating,
            message: req.message,
        }
    }
}

// ── Notifications, points ────────────────────────────────────

/// Inbox listing filters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationListQuery {
    #[serde(default)]
    pub unread_only: bool,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl NotificationListQuery {
    pub fn page_request(&self) -> PageRequest {
        PaginationParams {
            page: self.page,
            page_size: self.page_size,
        }
        .into_page_request()
    }
}

/// Manual points grant (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GrantPointsRequest {
    pub user_id: Uuid,
    /// Non-zero; negative values deduct.
    pub points: i32,
    #[validate(length(min = 1, max = 200, message = "A reason is required"))]
    pub reason: String,
}

// ── Places ───────────────────────────────────────────────────

/// Nearby search query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lng: f64,
    pub radius: Option<u32>,
    pub keyword: Option<String>,
    pub event_id: Option<Uuid>,
}

impl From<NearbyQuery> for NearbySearch {
    fn from(q: NearbyQuery) -> Self {
        Self {
            lat: q.lat,
            lng: q.lng,
            radius: q.radius,
            keyword: q.keyword,
            event_id: q.event_id,
        }
    }
}

/// Geocoding query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeQuery {
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_defaults_to_participated() {
        let req: FeedbackRequest = serde_json::from_str(r#"{"rating": 4}"#).unwrap();
        assert!(req.participated);
        assert!(req.validate().is_ok());

        let bad: FeedbackRequest = serde_json::from_str(r#"{"rating": 6}"#).unwrap();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_create_event_rejects_negative_cost() {
        let req: CreateEventRequest =
            serde_json::from_str(r#"{"title": "Bowling", "cost_per_person": -3.5}"#).unwrap();
        assert!(req.tag_ids.is_empty());
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_transition_parses_lowercase_state() {
        let req: TransitionRequest = serde_json::from_str(r#"{"state": "confirmed"}"#).unwrap();
        assert_eq!(req.state, EventState::Confirmed);
    }
}
