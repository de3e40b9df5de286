//! Feedback upsert and reporting.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use glyms_core::error::AppError;
use glyms_database::repositories::{EventRepository, FeedbackRepository};
use glyms_entity::feedback::{Feedback, FeedbackSummary, MAX_RATING, MIN_RATING, UpsertFeedback};

use crate::context::RequestContext;
use crate::event::{ensure_can_manage, load_event};
use crate::gamification::{GamificationService, Reward};

/// A participant's feedback.
#[derive(Debug, Clone)]
pub struct FeedbackInput {
    pub participated: bool,
    pub rating: Option<i16>,
    pub message: Option<String>,
}

/// All feedback of an event with its aggregate.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackReport {
    pub summary: FeedbackSummary,
    pub feedbacks: Vec<Feedback>,
}

/// Feedback use cases.
#[derive(Debug, Clone)]
pub struct FeedbackService {
    feedback_repo: Arc<FeedbackRepository>,
    event_repo: Arc<EventRepository>,
    gamification: Arc<GamificationService>,
}

impl FeedbackService {
    /// Creates a new feedback service.
    pub fn new(
        feedback_repo: Arc<FeedbackRepository>,
        event_repo: Arc<EventRepository>,
        gamification: Arc<GamificationService>,
    ) -> Self {
        Self {
            feedback_repo,
            event_repo,
            gamification,
        }
    }

    /// Create or replace the caller's feedback. First submission earns points.
    pub async fn submit(
        &self,
        ctx: &RequestContext,
        event_id: Uuid,
        input: FeedbackInput,
    ) -> Result<Feedback, AppError> {
        if let Some(rating) = input.rating {
            if !(MIN_RATING..=MAX_RATING).contains(&rating) {
                return Err(AppError::validation(format!(
                    "Rating must be between {MIN_RATING} and {MAX_RATING}"
                )));
            }
        }

        let event = load_event(&self.event_repo, ctx, event_id).await?;
        if !self.event_repo.is_participant(event.id, ctx.user_id).await? {
            return Err(AppError::authorization(
                "Only participants can leave feedback",
            ));
        }

        let message = input
            .message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());
        let upserted = self
            .feedback_repo
            .upsert(&UpsertFeedback {
                user_id: ctx.user_id,
                event_id: event.id,
                participated: input.participated,
                rating: input.rating,
                message,
            })
            .await?;

        info!(
            event_id = %event.id,
            user_id = %ctx.user_id,
            first = upserted.inserted,
            "Feedback saved"
        );

        if upserted.inserted {
            self.gamification.reward(ctx.user_id, Reward::Feedback).await?;
        }
        Ok(upserted.feedback)
    }

    /// Feedback report for the creator or an admin.
    pub async fn report(&self, ctx: &RequestContext, event_id: Uuid) -> Result<FeedbackReport, AppError> {
        let event = load_event(&self.event_repo, ctx, event_id).await?;
        ensure_can_manage(ctx, &event)?;
        let feedbacks = self.feedback_repo.list_for_event(event.id).await?;
        Ok(FeedbackReport {
            summary: FeedbackSummary::from_rows(&feedbacks),
            feedbacks,
        })
    }
}
