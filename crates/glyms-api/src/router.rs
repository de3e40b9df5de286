//! Route definitions for the Glyms HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// The session guard runs before any handler on protected prefixes.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(user_routes())
        .merge(company_routes())
        .merge(team_routes())
        .merge(tag_routes())
        .merge(event_routes())
        .merge(notification_routes())
        .merge(gamification_routes())
        .merge(places_routes())
        .merge(cron_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::session::require_session,
        ))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Registration, login, logout, invitations, password reset
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/invitations/accept", post(handlers::auth::accept_invitation))
        .route(
            "/auth/password-reset/request",
            post(handlers::auth::request_password_reset),
        )
        .route(
            "/auth/password-reset/confirm",
            post(handlers::auth::confirm_password_reset),
        )
}

/// Own profile plus company user administration
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/me",
            get(handlers::user::get_profile).put(handlers::user::update_profile),
        )
        .route("/users/me/password", put(handlers::user::change_password))
        .route("/users/me/onboarding", put(handlers::user::complete_onboarding))
        .route("/users/me/badge", put(handlers::user::select_badge))
        .route("/users", get(handlers::user::list_users))
        .route("/users/{id}/role", put(handlers::user::set_role))
        .route("/users/{id}/team", put(handlers::user::assign_team))
        .route("/users/{id}", delete(handlers::user::remove_user))
}

fn company_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/companies/me",
            get(handlers::company::get_company).put(handlers::company::rename_company),
        )
        .route("/companies/me/invitations", post(handlers::company::invite))
        .route(
            "/companies/me/blacklisted-places",
            get(handlers::company::list_blacklist).post(handlers::company::add_blacklist),
        )
        .route(
            "/companies/me/blacklisted-places/{id}",
            delete(handlers::company::remove_blacklist),
        )
}

fn team_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/teams",
            get(handlers::team::list_teams).post(handlers::team::create_team),
        )
        .route(
            "/teams/{id}",
            get(handlers::team::get_team)
                .put(handlers::team::rename_team)
                .delete(handlers::team::delete_team),
        )
        .route("/teams/{id}/members", get(handlers::team::team_members))
}

fn tag_routes() -> Router<AppState> {
    Router::new().route(
        "/tags",
        get(handlers::tag::list_tags).post(handlers::tag::create_tag),
    )
}

/// Events, participation, lifecycle, votes, feedback, event blacklist
fn event_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/events",
            get(handlers::event::list_events).post(handlers::event::create_event),
        )
        .route(
            "/events/{id}",
            get(handlers::event::get_event)
                .put(handlers::event::update_event)
                .delete(handlers::event::delete_event),
        )
        .route("/events/{id}/join", post(handlers::event::join_event))
        .route("/events/{id}/leave", post(handlers::event::leave_event))
        .route("/events/{id}/state", put(handlers::event::transition_event))
        .route("/events/{id}/finalize", post(handlers::event::finalize_event))
        .route("/events/{id}/popular-tag", get(handlers::event::popular_tag))
        .route("/events/{id}/popular-date", get(handlers::event::popular_date))
        .route(
            "/events/{id}/google-maps-tags",
            get(handlers::event::google_maps_tags),
        )
        .route(
            "/events/{id}/preferences/me",
            get(handlers::preference::my_preference).put(handlers::preference::upsert_preference),
        )
        .route(
            "/events/{id}/preferences",
            get(handlers::preference::list_preferences),
        )
        .route(
            "/events/{id}/feedback",
            get(handlers::feedback::feedback_report).post(handlers::feedback::submit_feedback),
        )
        .route(
            "/events/{id}/blacklisted-places",
            get(handlers::places::list_event_blacklist).post(handlers::places::add_event_blacklist),
        )
        .route(
            "/events/{id}/blacklisted-places/{place_id}",
            delete(handlers::places::remove_event_blacklist),
        )
}

/// Notification inbox
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(handlers::notification::list_notifications))
        .route(
            "/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/read-all",
            put(handlers::notification::mark_all_read),
        )
        .route("/notifications/{id}/read", put(handlers::notification::mark_read))
        .route(
            "/notifications/{id}",
            delete(handlers::notification::delete_notification),
        )
}

fn gamification_routes() -> Router<AppState> {
    Router::new()
        .route("/badges", get(handlers::gamification::list_badges))
        .route("/points/history", get(handlers::gamification::points_history))
        .route("/points", post(handlers::gamification::grant_points))
}

fn places_routes() -> Router<AppState> {
    Router::new()
        .route("/places/nearby", get(handlers::places::nearby))
        .route("/places/geocode", get(handlers::places::geocode))
}

/// Sweeps triggered by an external scheduler
fn cron_routes() -> Router<AppState> {
    Router::new()
        .route("/cron/event-reminders", post(handlers::cron::event_reminders))
        .route("/cron/feedback-requests", post(handlers::cron::feedback_requests))
}
