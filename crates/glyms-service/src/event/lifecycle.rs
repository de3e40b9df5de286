//! State transitions and the preference tally.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use glyms_core::error::AppError;
use glyms_database::repositories::{EventRepository, PreferenceRepository, TagRepository};
use glyms_entity::event::{Event, EventState};
use glyms_entity::notification::NotificationKind;

use super::{ensure_can_manage, load_event};
use crate::context::RequestContext;
use crate::notification::NotificationService;
use crate::tally::{self, DateTally, GoogleMapsTally, TagTally};

/// Result of confirming an event.
#[derive(Debug, Clone, Serialize)]
pub struct FinalizeOutcome {
    pub event: Event,
    pub winning_tag: Option<TagTally>,
    pub winning_date: Option<DateTally>,
}

/// Drives the `pending → confirmed → planned` lifecycle.
#[derive(Debug, Clone)]
pub struct LifecycleService {
    event_repo: Arc<EventRepository>,
    pref_repo: Arc<PreferenceRepository>,
    tag_repo: Arc<TagRepository>,
    notifications: Arc<NotificationService>,
}

impl LifecycleService {
    /// Creates a new lifecycle service.
    pub fn new(
        event_repo: Arc<EventRepository>,
        pref_repo: Arc<PreferenceRepository>,
        tag_repo: Arc<TagRepository>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            event_repo,
            pref_repo,
            tag_repo,
            notifications,
        }
    }

    /// Move an event to `target`.
    ///
    /// Confirming runs the tally; confirming and cancelling notify every
    /// participant.
    pub async fn transition(
        &self,
        ctx: &RequestContext,
        event_id: Uuid,
        target: EventState,
    ) -> Result<Event, AppError> {
        let event = load_event(&self.event_repo, ctx, event_id).await?;
        ensure_can_manage(ctx, &event)?;

        if !event.state.can_transition_to(target) {
            return Err(AppError::conflict(format!(
                "Cannot move an event from {} to {}",
                event.state, target
            )));
        }

        match target {
            EventState::Confirmed => Ok(self.confirm(event).await?.event),
            EventState::Cancelled => {
                let updated = self
                    .event_repo
                    .set_state(event.id, target)
                    .await?
                    .ok_or_else(|| changed_concurrently(target))?;
                self.notify_participants(
                    &updated,
                    NotificationKind::EventCancelled,
                    format!("\"{}\" has been cancelled.", updated.title),
                )
                .await?;
                info!(event_id = %event.id, user_id = %ctx.user_id, "Event cancelled");
                Ok(updated)
            }
            _ => {
                let updated = self
                    .event_repo
                    .set_state(event.id, target)
                    .await?
                    .ok_or_else(|| changed_concurrently(target))?;
                info!(
                    event_id = %event.id,
                    state = %target,
                    user_id = %ctx.user_id,
                    "Event state changed"
                );
                Ok(updated)
            }
        }
    }

    /// Confirm an event with the tally winners.
    pub async fn finalize(&self, ctx: &RequestContext, event_id: Uuid) -> Result<FinalizeOutcome, AppError> {
        let event = load_event(&self.event_repo, ctx, event_id).await?;
        ensure_can_manage(ctx, &event)?;

        if !event.state.can_transition_to(EventState::Confirmed) {
            return Err(AppError::conflict(format!(
                "Cannot confirm an event that is {}",
                event.state
            )));
        }
        self.confirm(event).await
    }

    /// Most voted activity tag. `None` without preferences.
    pub async fn popular_tag(&self, ctx: &RequestContext, event_id: Uuid) -> Result<Option<TagTally>, AppError> {
        let event = load_event(&self.event_repo, ctx, event_id).await?;
        let preferences = self.pref_repo.list_for_event(event.id).await?;
        let tags = self.tag_repo.list().await?;
        Ok(tally::most_voted_tag(&preferences, &tags))
    }

    /// Most voted date. `None` without preferences.
    pub async fn popular_date(&self, ctx: &RequestContext, event_id: Uuid) -> Result<Option<DateTally>, AppError> {
        let event = load_event(&self.event_repo, ctx, event_id).await?;
        let preferences = self.pref_repo.list_for_event(event.id).await?;
        Ok(tally::most_voted_date(&preferences))
    }

    /// Summed Google Maps tag weights.
    pub async fn google_maps_tags(&self, ctx: &RequestContext, event_id: Uuid) -> Result<GoogleMapsTally, AppError> {
        let event = load_event(&self.event_repo, ctx, event_id).await?;
        let preferences = self.pref_repo.list_for_event(event.id).await?;
        Ok(tally::google_maps_tally(&preferences))
    }

    async fn confirm(&self, event: Event) -> Result<FinalizeOutcome, AppError> {
        let preferences = self.pref_repo.list_for_event(event.id).await?;
        let tags = self.tag_repo.list().await?;

        let winning_tag = tally::most_voted_tag(&preferences, &tags);
        let winning_date = tally::most_voted_date(&preferences);

        if preferences.is_empty() {
            warn!(event_id = %event.id, "Confirming event without any preferences");
        }

        let confirmed = self
            .event_repo
            .confirm(
                event.id,
                winning_tag.as_ref().map(|t| t.tag.name.as_str()),
                winning_date.as_ref().map(|d| d.date),
            )
            .await?
            .ok_or_else(|| changed_concurrently(EventState::Confirmed))?;

        self.notify_participants(
            &confirmed,
            NotificationKind::EventConfirmed,
            confirmed_message(&confirmed),
        )
        .await?;

        info!(
            event_id = %confirmed.id,
            votes = preferences.len(),
            activity = ?confirmed.activity_type,
            start_date = ?confirmed.start_date,
            "Event confirmed"
        );

        Ok(FinalizeOutcome {
            event: confirmed,
            winning_tag,
            winning_date,
        })
    }

    async fn notify_participants(
        &self,
        event: &Event,
        kind: NotificationKind,
        message: String,
    ) -> Result<usize, AppError> {
        let participants = self.event_repo.participant_ids(event.id).await?;
        self.notifications
            .notify_all(&participants, kind, &message, Some(event.id))
            .await
    }
}

/// The event left the state the transition was checked against.
fn changed_concurrently(target: EventState) -> AppError {
    AppError::conflict(format!(
        "The event changed state and can no longer be moved to {target}"
    ))
}

fn confirmed_message(event: &Event) -> String {
    match (&event.activity_type, event.start_date) {
        (Some(activity), Some(date)) => {
            format!("\"{}\" is confirmed: {} on {}.", event.title, activity, date)
        }
        (None, Some(date)) => format!("\"{}\" is confirmed for {}.", event.title, date),
        (Some(activity), None) => format!("\"{}\" is confirmed: {}.", event.title, activity),
        (None, None) => format!("\"{}\" is confirmed.", event.title),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn event() -> Event {
        Event {
            id: Uuid::new_v4(),
            company_id: Uuid::nil(),
            title: "Offsite".into(),
            description: None,
            state: EventState::Confirmed,
            start_date: None,
            end_date: None,
            start_time: None,
            end_time: None,
            duration: None,
            city: None,
            activity_type: None,
            max_persons: None,
            cost_per_person: None,
            created_by_id: Uuid::nil(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_changed_concurrently_is_a_conflict() {
        let err = changed_concurrently(EventState::Confirmed);
        assert_eq!(err.kind, glyms_core::error::ErrorKind::Conflict);
        assert!(err.message.contains("confirmed"));
    }

    #[test]
    fn test_confirmed_message() {
        let mut e = event();
        assert_eq!(confirmed_message(&e), "\"Offsite\" is confirmed.");

        e.activity_type = Some("Escape room".into());
        e.start_date = NaiveDate::from_ymd_opt(2026, 6, 12);
        assert_eq!(
            confirmed_message(&e),
            "\"Offsite\" is confirmed: Escape room on 2026-06-12."
        );
    }
}
