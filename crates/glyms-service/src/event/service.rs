//! Event CRUD and participation.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tracing::info;
use uuid::Uuid;

use glyms_core::error::AppError;
use glyms_core::types::pagination::{PageRequest, PageResponse};
use glyms_database::repositories::{EventRepository, JoinOutcome, TagRepository, UserRepository};
use glyms_entity::event::{CreateEvent, Event, EventDetails, EventState, UpdateEvent};
use glyms_entity::notification::NotificationKind;

use super::{ensure_can_manage, load_event};
use crate::context::RequestContext;
use crate::gamification::{GamificationService, Reward};
use crate::notification::NotificationService;

/// Input for creating an event.
#[derive(Debug, Clone, Default)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub duration: Option<i32>,
    pub city: Option<String>,
    pub max_persons: Option<i32>,
    pub cost_per_person: Option<f64>,
    pub tag_ids: Vec<Uuid>,
    /// Colleagues added as participants up front.
    pub participant_ids: Vec<Uuid>,
}

/// Input for editing an event.
#[derive(Debug, Clone, Default)]
pub struct EventChanges {
    pub fields: UpdateEvent,
    /// Replaces the tag set when present.
    pub tag_ids: Option<Vec<Uuid>>,
}

/// Event CRUD and participation use cases.
#[derive(Debug, Clone)]
pub struct EventService {
    event_repo: Arc<EventRepository>,
    tag_repo: Arc<TagRepository>,
    user_repo: Arc<UserRepository>,
    notifications: Arc<NotificationService>,
    gamification: Arc<GamificationService>,
}

impl EventService {
    /// Creates a new event service.
    pub fn new(
        event_repo: Arc<EventRepository>,
        tag_repo: Arc<TagRepository>,
        user_repo: Arc<UserRepository>,
        notifications: Arc<NotificationService>,
        gamification: Arc<GamificationService>,
    ) -> Self {
        Self {
            event_repo,
            tag_repo,
            user_repo,
            notifications,
            gamification,
        }
    }

    /// Create a pending event; the creator joins automatically.
    pub async fn create(&self, ctx: &RequestContext, input: NewEvent) -> Result<EventDetails, AppError> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(AppError::validation("Title is required"));
        }
        check_dates(input.start_date, input.end_date)?;

        let tag_ids = dedup(&input.tag_ids);
        self.ensure_tags_exist(&tag_ids).await?;

        let participant_ids = dedup(&input.participant_ids);
        if !participant_ids.is_empty() {
            let found = self
                .user_repo
                .count_in_company(ctx.company_id, &participant_ids)
                .await?;
            if found as usize != participant_ids.len() {
                return Err(AppError::validation(
                    "Participants must be members of your company",
                ));
            }
        }

        let data = CreateEvent {
            company_id: ctx.company_id,
            created_by_id: ctx.user_id,
            title: title.to_string(),
            description: input.description,
            start_date: input.start_date,
            end_date: input.end_date,
            start_time: input.start_time,
            end_time: input.end_time,
            duration: input.duration,
            city: input.city,
            max_persons: input.max_persons,
            cost_per_person: input.cost_per_person,
        };
        let event = self.event_repo.create(&data, &tag_ids, &participant_ids).await?;

        info!(event_id = %event.id, user_id = %ctx.user_id, "Event created");
        self.details(event).await
    }

    /// Events the caller created or participates in.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        state: Option<EventState>,
        page: PageRequest,
    ) -> Result<PageResponse<Event>, AppError> {
        self.event_repo.list_for_user(ctx.user_id, state, &page).await
    }

    /// One event with its tags and participants.
    pub async fn get(&self, ctx: &RequestContext, event_id: Uuid) -> Result<EventDetails, AppError> {
        let event = load_event(&self.event_repo, ctx, event_id).await?;
        self.details(event).await
    }

    /// Edit an event that is not cancelled.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        event_id: Uuid,
        changes: EventChanges,
    ) -> Result<EventDetails, AppError> {
        let event = load_event(&self.event_repo, ctx, event_id).await?;
        ensure_can_manage(ctx, &event)?;
        if event.state.is_cancelled() {
            return Err(AppError::conflict("A cancelled event cannot be edited"));
        }
        if let Some(title) = &changes.fields.title {
            if title.trim().is_empty() {
                return Err(AppError::validation("Title cannot be empty"));
            }
        }
        check_dates(
            changes.fields.start_date.or(event.start_date),
            changes.fields.end_date.or(event.end_date),
        )?;

        if let Some(tag_ids) = &changes.tag_ids {
            let tag_ids = dedup(tag_ids);
            self.ensure_tags_exist(&tag_ids).await?;
            self.event_repo.replace_tags(event.id, &tag_ids).await?;
        }

        let updated = self.event_repo.update(event.id, &changes.fields).await?;
        info!(event_id = %event.id, user_id = %ctx.user_id, "Event updated");
        self.details(updated).await
    }

    /// Delete an event.
    pub async fn delete(&self, ctx: &RequestContext, event_id: Uuid) -> Result<(), AppError> {
        let event = load_event(&self.event_repo, ctx, event_id).await?;
        ensure_can_manage(ctx, &event)?;
        self.event_repo.delete(event.id).await?;
        info!(event_id = %event.id, user_id = %ctx.user_id, "Event deleted");
        Ok(())
    }

    /// Join an event of the caller's company.
    pub async fn join(&self, ctx: &RequestContext, event_id: Uuid) -> Result<EventDetails, AppError> {
        let event = load_event(&self.event_repo, ctx, event_id).await?;
        if event.state.is_cancelled() {
            return Err(AppError::conflict("Cannot join a cancelled event"));
        }

        let first_time = match self.event_repo.add_participant(event.id, ctx.user_id).await? {
            JoinOutcome::Joined { first_time } => first_time,
            JoinOutcome::AlreadyParticipant => {
                return Err(AppError::conflict("You already participate in this event"));
            }
            JoinOutcome::Full => {
                return Err(AppError::conflict("This event is full"));
            }
        };

        info!(event_id = %event.id, user_id = %ctx.user_id, "User joined event");

        if !event.is_owned_by(ctx.user_id) {
            self.notifications
                .notify(
                    event.created_by_id,
                    NotificationKind::EventInvitationAccepted,
                    format!("{} joined \"{}\".", ctx.email, event.title),
                    Some(event.id),
                )
                .await?;
        }
        // Rejoining after leaving earns nothing.
        if first_time {
            self.gamification.reward(ctx.user_id, Reward::JoinEvent).await?;
        }

        self.details(event).await
    }

    /// Leave an event. The creator cannot leave their own event.
    pub async fn leave(&self, ctx: &RequestContext, event_id: Uuid) -> Result<(), AppError> {
        let event = load_event(&self.event_repo, ctx, event_id).await?;
        if event.is_owned_by(ctx.user_id) {
            return Err(AppError::validation("The creator cannot leave their own event"));
        }
        if !self.event_repo.remove_participant(event.id, ctx.user_id).await? {
            return Err(AppError::not_found("You do not participate in this event"));
        }
        info!(event_id = %event.id, user_id = %ctx.user_id, "User left event");
        Ok(())
    }

    async fn ensure_tags_exist(&self, tag_ids: &[Uuid]) -> Result<(), AppError> {
        if tag_ids.is_empty() {
            return Ok(());
        }
        let found = self.tag_repo.find_many(tag_ids).await?;
        if found.len() != tag_ids.len() {
            return Err(AppError::validation("Unknown tag id"));
        }
        Ok(())
    }

    async fn details(&self, event: Event) -> Result<EventDetails, AppError> {
        let tags = self.event_repo.tags(event.id).await?;
        let participants = self.event_repo.participants(event.id).await?;
        Ok(EventDetails {
            event,
            tags,
            participants,
        })
    }
}

fn dedup(ids: &[Uuid]) -> Vec<Uuid> {
    ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
}

fn check_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<(), AppError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => {
            Err(AppError::validation("End date cannot be before start date"))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_dates() {
        let d = |day| NaiveDate::from_ymd_opt(2026, 5, day).unwrap();
        assert!(check_dates(Some(d(2)), Some(d(2))).is_ok());
        assert!(check_dates(Some(d(2)), Some(d(1))).is_err());
        assert!(check_dates(None, Some(d(1))).is_ok());
    }

    #[test]
    fn test_dedup() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(dedup(&[a, b, a]).len(), 2);
    }
}
