//! Event CRUD, participation, and lifecycle.

pub mod lifecycle;
pub mod service;

pub use lifecycle::{FinalizeOutcome, LifecycleService};
pub use service::{EventChanges, EventService, NewEvent};

use uuid::Uuid;

use glyms_core::error::AppError;
use glyms_database::repositories::EventRepository;
use glyms_entity::event::Event;

use crate::context::RequestContext;

/// Load an event of the caller's company, or 404.
pub(crate) async fn load_event(
    repo: &EventRepository,
    ctx: &RequestContext,
    event_id: Uuid,
) -> Result<Event, AppError> {
    repo.find_in_company(ctx.company_id, event_id)
        .await?
        .ok_or_else(|| AppError::not_found("Event not found"))
}

/// Only the creator or a company admin may manage an event.
pub(crate) fn ensure_can_manage(ctx: &RequestContext, event: &Event) -> Result<(), AppError> {
    if event.is_owned_by(ctx.user_id) || ctx.is_admin() {
        Ok(())
    } else {
        Err(AppError::authorization(
            "Only the event creator or an administrator can do this",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use glyms_entity::event::EventState;
    use glyms_entity::user::UserRole;

    fn event_by(owner: Uuid) -> Event {
        Event {
            id: Uuid::new_v4(),
            company_id: Uuid::nil(),
            title: "Hike".into(),
            description: None,
            state: EventState::Pending,
            start_date: None,
            end_date: None,
            start_time: None,
            end_time: None,
            duration: None,
            city: None,
            activity_type: None,
            max_persons: None,
            cost_per_person: None,
            created_by_id: owner,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_manage_permission() {
        let owner = Uuid::new_v4();
        let event = event_by(owner);

        let creator = RequestContext::new(owner, Uuid::nil(), UserRole::Standard, "a@x".into());
        let admin = RequestContext::new(Uuid::new_v4(), Uuid::nil(), UserRole::Admin, "b@x".into());
        let other = RequestContext::new(Uuid::new_v4(), Uuid::nil(), UserRole::Standard, "c@x".into());

        assert!(ensure_can_manage(&creator, &event).is_ok());
        assert!(ensure_can_manage(&admin, &event).is_ok());
        assert!(ensure_can_manage(&other, &event).is_err());
    }
}
