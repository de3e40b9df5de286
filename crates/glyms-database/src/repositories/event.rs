//! Event repository implementation.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use glyms_core::error::{AppError, ErrorKind};
use glyms_core::result::AppResult;
use glyms_core::types::pagination::{PageRequest, PageResponse};
use glyms_entity::event::{CreateEvent, Event, EventState, UpdateEvent};
use glyms_entity::tag::Tag;
use glyms_entity::user::UserSummary;

/// Result of a join attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The user was added. `first_time` is false when they joined this
    /// event before and left it since.
    Joined { first_time: bool },
    /// The user already participates.
    AlreadyParticipant,
    /// `max_persons` is reached.
    Full,
}

/// Repository for events, their tags, and their participants.
#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Create a new event repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an event with its tags and initial participants.
    ///
    /// The creator is always added as a participant.
    pub async fn create(
        &self,
        data: &CreateEvent,
        tag_ids: &[Uuid],
        participant_ids: &[Uuid],
    ) -> AppResult<Event> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let event = sqlx::query_as::<_, Event>(
            "INSERT INTO events (company_id, created_by_id, title, description, start_date, \
                end_date, start_time, end_time, duration, city, max_persons, cost_per_person) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING *",
        )
        .bind(data.company_id)
        .bind(data.created_by_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.start_time)
        .bind(data.end_time)
        .bind(data.duration)
        .bind(&data.city)
        .bind(data.max_persons)
        .bind(data.cost_per_person)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create event", e))?;

        sqlx::query(
            "INSERT INTO event_tags (event_id, tag_id) \
             SELECT $1, UNNEST($2::uuid[]) ON CONFLICT DO NOTHING",
        )
        .bind(event.id)
        .bind(tag_ids)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to attach tags", e))?;

        let mut members = Vec::with_capacity(participant_ids.len() + 1);
        members.push(data.created_by_id);
        members.extend(participant_ids.iter().copied().filter(|id| *id != data.created_by_id));

        sqlx::query(
            "INSERT INTO event_participants (event_id, user_id) \
             SELECT $1, UNNEST($2::uuid[]) ON CONFLICT DO NOTHING",
        )
        .bind(event.id)
        .bind(&members)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to add participants", e))?;

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit event", e))?;

        Ok(event)
    }

    /// Find an event by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Event>> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find event", e))
    }

    /// Find an event only if it belongs to `company_id`.
    pub async fn find_in_company(&self, company_id: Uuid, id: Uuid) -> AppResult<Option<Event>> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1 AND company_id = $2")
            .bind(id)
            .bind(company_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find event", e))
    }

    /// Events the user created or participates in, newest first.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        state: Option<EventState>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Event>> {
        const FILTER: &str = "(e.created_by_id = $1 OR EXISTS ( \
                SELECT 1 FROM event_participants p WHERE p.event_id = e.id AND p.user_id = $1)) \
             AND ($2::event_state IS NULL OR e.state = $2)";

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM events e WHERE {FILTER}"))
            .bind(user_id)
            .bind(state)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count events", e))?;

        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT e.* FROM events e WHERE {FILTER} \
             ORDER BY e.start_date DESC NULLS LAST, e.created_at DESC LIMIT $3 OFFSET $4"
        ))
        .bind(user_id)
        .bind(state)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list events", e))?;

        Ok(PageResponse::new(events, page, total as u64))
    }

    /// Update editable fields, keeping the columns whose value is `None`.
    pub async fn update(&self, id: Uuid, data: &UpdateEvent) -> AppResult<Event> {
        sqlx::query_as::<_, Event>(
            "UPDATE events SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                start_date = COALESCE($4, start_date), \
                end_date = COALESCE($5, end_date), \
                start_time = COALESCE($6, start_time), \
                end_time = COALESCE($7, end_time), \
                duration = COALESCE($8, duration), \
                city = COALESCE($9, city), \
                max_persons = COALESCE($10, max_persons), \
                cost_per_person = COALESCE($11, cost_per_person), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.start_time)
        .bind(data.end_time)
        .bind(data.duration)
        .bind(&data.city)
        .bind(data.max_persons)
        .bind(data.cost_per_person)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update event", e))?
        .ok_or_else(|| AppError::not_found("Event not found"))
    }

    /// Replace the tag set of an event.
    pub async fn replace_tags(&self, id: Uuid, tag_ids: &[Uuid]) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query("DELETE FROM event_tags WHERE event_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to clear tags", e))?;

        sqlx::query(
            "INSERT INTO event_tags (event_id, tag_id) \
             SELECT $1, UNNEST($2::uuid[]) ON CONFLICT DO NOTHING",
        )
        .bind(id)
        .bind(tag_ids)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to attach tags", e))?;

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit tags", e))
    }

    /// Delete an event and everything hanging off it.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete event", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Move the event to `state` if its stored state still allows it.
    ///
    /// Returns `None` when the row is gone or another writer moved it to a
    /// state from which `state` is not reachable.
    pub async fn set_state(&self, id: Uuid, state: EventState) -> AppResult<Option<Event>> {
        sqlx::query_as::<_, Event>(
            "UPDATE events SET state = $2, updated_at = NOW() \
             WHERE id = $1 AND state::text = ANY($3) RETURNING *",
        )
        .bind(id)
        .bind(state)
        .bind(EventState::sources_of(state))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update event state", e))
    }

    /// Write the tally winners and mark the event confirmed.
    ///
    /// Absent winners leave the corresponding columns unchanged. A winning
    /// date moves the whole date range: a stored span is kept, and an
    /// `end_date` alone never ends up before the new `start_date`.
    ///
    /// Returns `None` under the same conditions as [`Self::set_state`].
    pub async fn confirm(
        &self,
        id: Uuid,
        activity_type: Option<&str>,
        start_date: Option<NaiveDate>,
    ) -> AppResult<Option<Event>> {
        sqlx::query_as::<_, Event>(
            "UPDATE events SET \
                state = 'confirmed', \
                activity_type = COALESCE($2, activity_type), \
                start_date = COALESCE($3, start_date), \
                end_date = CASE \
                    WHEN $3::date IS NULL THEN end_date \
                    WHEN start_date IS NOT NULL AND end_date IS NOT NULL \
                        THEN $3::date + (end_date - start_date) \
                    ELSE GREATEST(end_date, $3::date) \
                END, \
                updated_at = NOW() \
             WHERE id = $1 AND state::text = ANY($4) RETURNING *",
        )
        .bind(id)
        .bind(activity_type)
        .bind(start_date)
        .bind(EventState::sources_of(EventState::Confirmed))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to confirm event", e))
    }

    /// Tags attached to an event.
    pub async fn tags(&self, event_id: Uuid) -> AppResult<Vec<Tag>> {
        sqlx::query_as::<_, Tag>(
            "SELECT t.* FROM tags t JOIN event_tags et ON et.tag_id = t.id \
             WHERE et.event_id = $1 ORDER BY t.name",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load event tags", e))
    }

    /// Participants of an event.
    pub async fn participants(&self, event_id: Uuid) -> AppResult<Vec<UserSummary>> {
        sqlx::query_as::<_, UserSummary>(
            "SELECT u.id, u.email, u.first_name, u.last_name, u.role, u.team_id, u.points, \
                u.photo_url \
             FROM users u JOIN event_participants p ON p.user_id = u.id \
             WHERE p.event_id = $1 ORDER BY p.joined_at",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load participants", e))
    }

    /// Ids of an event's participants.
    pub async fn participant_ids(&self, event_id: Uuid) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar("SELECT user_id FROM event_participants WHERE event_id = $1")
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load participant ids", e)
            })
    }

    /// Whether `user_id` participates in the event.
    pub async fn is_participant(&self, event_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM event_participants WHERE event_id = $1 AND user_id = $2)",
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check participant", e))
    }

    /// Add a participant while respecting `max_persons`.
    ///
    /// The event row is locked so concurrent joins cannot overshoot the cap.
    /// The join is also recorded in `event_join_rewards`, which leaving does
    /// not clear.
    pub async fn add_participant(&self, event_id: Uuid, user_id: Uuid) -> AppResult<JoinOutcome> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let max_persons: Option<i32> =
            sqlx::query_scalar("SELECT max_persons FROM events WHERE id = $1 FOR UPDATE")
                .bind(event_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock event", e))?
                .ok_or_else(|| AppError::not_found("Event not found"))?;

        let (already, count): (bool, i64) = sqlx::query_as(
            "SELECT COALESCE(BOOL_OR(user_id = $2), FALSE), COUNT(*) \
             FROM event_participants WHERE event_id = $1",
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count participants", e))?;

        if already {
            return Ok(JoinOutcome::AlreadyParticipant);
        }
        if max_persons.is_some_and(|cap| count >= i64::from(cap)) {
            return Ok(JoinOutcome::Full);
        }

        sqlx::query("INSERT INTO event_participants (event_id, user_id) VALUES ($1, $2)")
            .bind(event_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to join event", e))?;

        let first_time = sqlx::query(
            "INSERT INTO event_join_rewards (event_id, user_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(event_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record join", e))?
        .rows_affected()
            > 0;

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit join", e))?;

        Ok(JoinOutcome::Joined { first_time })
    }

    /// Remove a participant. Returns `false` if they were not participating.
    pub async fn remove_participant(&self, event_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM event_participants WHERE event_id = $1 AND user_id = $2")
                .bind(event_id)
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to leave event", e)
                })?;
        Ok(result.rows_affected() > 0)
    }

    /// Confirmed or planned events whose `start_date` lies in `[from, to]`.
    pub async fn find_starting_between(&self, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<Event>> {
        sqlx::query_as::<_, Event>(
            "SELECT * FROM events \
             WHERE state IN ('confirmed', 'planned') AND start_date BETWEEN $1 AND $2 \
             ORDER BY start_date",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find upcoming events", e))
    }

    /// Non-cancelled events whose last day lies in `[from, to]`.
    pub async fn find_ended_between(&self, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<Event>> {
        sqlx::query_as::<_, Event>(
            "SELECT * FROM events \
             WHERE state <> 'cancelled' AND COALESCE(end_date, start_date) BETWEEN $1 AND $2 \
             ORDER BY COALESCE(end_date, start_date)",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find past events", e))
    }
}
