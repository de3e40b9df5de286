//! Preference upsert and listing.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use glyms_core::error::AppError;
use glyms_database::repositories::{EventRepository, PreferenceRepository, TagRepository};
use glyms_entity::preference::{EventUserPreference, GoogleMapsTags, UpsertPreference};

use crate::context::RequestContext;
use crate::event::{ensure_can_manage, load_event};
use crate::gamification::{GamificationService, Reward};

/// A participant's vote.
#[derive(Debug, Clone)]
pub struct PreferenceInput {
    pub tag_id: Uuid,
    pub preferred_date: NaiveDate,
    pub google_maps_tags: Option<GoogleMapsTags>,
}

/// Preference use cases.
#[derive(Debug, Clone)]
pub struct PreferenceService {
    pref_repo: Arc<PreferenceRepository>,
    event_repo: Arc<EventRepository>,
    tag_repo: Arc<TagRepository>,
    gamification: Arc<GamificationService>,
}

impl PreferenceService {
    /// Creates a new preference service.
    pub fn new(
        pref_repo: Arc<PreferenceRepository>,
        event_repo: Arc<EventRepository>,
        tag_repo: Arc<TagRepository>,
        gamification: Arc<GamificationService>,
    ) -> Self {
        Self {
            pref_repo,
            event_repo,
            tag_repo,
            gamification,
        }
    }

    /// Create or replace the caller's vote for a pending event.
    ///
    /// Points are granted only for the first vote.
    pub async fn upsert(
        &self,
        ctx: &RequestContext,
        event_id: Uuid,
        input: PreferenceInput,
    ) -> Result<EventUserPreference, AppError> {
        let event = load_event(&self.event_repo, ctx, event_id).await?;
        if !self.event_repo.is_participant(event.id, ctx.user_id).await? {
            return Err(AppError::authorization(
                "Only participants can vote on this event",
            ));
        }
        if !event.state.accepts_preferences() {
            return Err(AppError::conflict(
                "Preferences are closed for this event",
            ));
        }
        self.tag_repo
            .find_by_id(input.tag_id)
            .await?
            .ok_or_else(|| AppError::validation("Unknown tag id"))?;
        if let Some(tags) = &input.google_maps_tags {
            check_weights(tags)?;
        }

        let upserted = self
            .pref_repo
            .upsert(&UpsertPreference {
                user_id: ctx.user_id,
                event_id: event.id,
                tag_id: input.tag_id,
                preferred_date: input.preferred_date,
                google_maps_tags: input.google_maps_tags,
            })
            .await?;

        info!(
            event_id = %event.id,
            user_id = %ctx.user_id,
            first = upserted.inserted,
            "Preference saved"
        );

        if upserted.inserted {
            self.gamification.reward(ctx.user_id, Reward::Preference).await?;
        }
        Ok(upserted.preference)
    }

    /// The caller's vote, or 404.
    pub async fn mine(&self, ctx: &RequestContext, event_id: Uuid) -> Result<EventUserPreference, AppError> {
        let event = load_event(&self.event_repo, ctx, event_id).await?;
        self.pref_repo
            .find(ctx.user_id, event.id)
            .await?
            .ok_or_else(|| AppError::not_found("No preference for this event"))
    }

    /// Every vote of an event (creator or admin).
    pub async fn list(&self, ctx: &RequestContext, event_id: Uuid) -> Result<Vec<EventUserPreference>, AppError> {
        let event = load_event(&self.event_repo, ctx, event_id).await?;
        ensure_can_manage(ctx, &event)?;
        self.pref_repo.list_for_event(event.id).await
    }
}

fn check_weights(tags: &GoogleMapsTags) -> Result<(), AppError> {
    for (tag, weight) in tags {
        if tag.trim().is_empty() {
            return Err(AppError::validation("Google Maps tags cannot be empty"));
        }
        if !weight.is_finite() || *weight < 0.0 {
            return Err(AppError::validation(format!(
                "Weight for \"{tag}\" must be a non-negative number"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_weights() {
        let ok = GoogleMapsTags::from([("bowling_alley".to_string(), 2.0), ("park".to_string(), 0.0)]);
        assert!(check_weights(&ok).is_ok());

        let negative = GoogleMapsTags::from([("park".to_string(), -1.0)]);
        assert!(check_weights(&negative).is_err());

        let blank = GoogleMapsTags::from([("  ".to_string(), 1.0)]);
        assert!(check_weights(&blank).is_err());

        let nan = GoogleMapsTags::from([("bar".to_string(), f64::NAN)]);
        assert!(check_weights(&nan).is_err());
    }
}
