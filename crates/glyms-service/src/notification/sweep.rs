//! Event reminder and feedback request sweeps.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use tracing::info;

use glyms_core::config::CronConfig;
use glyms_core::error::AppError;
use glyms_database::repositories::{EventRepository, FeedbackRepository, NotificationRepository};
use glyms_entity::event::Event;
use glyms_entity::notification::{CreateNotification, NotificationKind};

/// Result of one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Events that matched the window.
    pub events: usize,
    /// Notifications actually inserted.
    pub notifications_sent: usize,
}

/// Whether an event should get a reminder at `now`.
///
/// The event starts at `start_date` + `start_time` (midnight when unset). It
/// is due when its day is not in the past and that instant is no later than
/// `now + lookahead`. An event whose start time already passed today is not
/// reminded.
pub fn reminder_due(event: &Event, now: DateTime<Utc>, lookahead: Duration) -> bool {
    let Some(date) = event.start_date else {
        return false;
    };
    if date < now.date_naive() {
        return false;
    }
    let starts_at = date
        .and_time(event.start_time.unwrap_or(NaiveTime::MIN))
        .and_utc();
    if event.start_time.is_some() && starts_at < now {
        return false;
    }
    starts_at <= now + lookahead
}

/// Whether an event should get feedback requests on `today`.
///
/// Due when the last day is strictly before `today` and at most
/// `lookback_days` ago.
pub fn feedback_due(event: &Event, today: NaiveDate, lookback_days: i64) -> bool {
    if event.state.is_cancelled() {
        return false;
    }
    match event.last_day() {
        Some(last) => last < today && last >= today - Duration::days(lookback_days),
        None => false,
    }
}

/// Runs the de-duplicated notification sweeps.
#[derive(Debug, Clone)]
pub struct SweepService {
    event_repo: Arc<EventRepository>,
    feedback_repo: Arc<FeedbackRepository>,
    notif_repo: Arc<NotificationRepository>,
    config: CronConfig,
}

impl SweepService {
    /// Creates a new sweep service.
    pub fn new(
        event_repo: Arc<EventRepository>,
        feedback_repo: Arc<FeedbackRepository>,
        notif_repo: Arc<NotificationRepository>,
        config: CronConfig,
    ) -> Self {
        Self {
            event_repo,
            feedback_repo,
            notif_repo,
            config,
        }
    }

    /// Remind participants of confirmed or planned events starting soon.
    pub async fn send_event_reminders(&self, now: DateTime<Utc>) -> Result<SweepReport, AppError> {
        let lookahead = Duration::hours(self.config.reminder_lookahead_hours);
        let events = self
            .event_repo
            .find_starting_between(now.date_naive(), (now + lookahead).date_naive())
            .await?;

        let mut report = SweepReport::default();
        for event in events.iter().filter(|e| reminder_due(e, now, lookahead)) {
            report.events += 1;
            let message = reminder_message(event);
            for user_id in self.event_repo.participant_ids(event.id).await? {
                let inserted = self
                    .notif_repo
                    .insert_deduplicated(&CreateNotification {
                        user_id,
                        kind: NotificationKind::EventReminder,
                        message: message.clone(),
                        event_id: Some(event.id),
                    })
                    .await?;
                report.notifications_sent += usize::from(inserted);
            }
        }

        info!(
            events = report.events,
            sent = report.notifications_sent,
            "Event reminder sweep finished"
        );
        Ok(report)
    }

    /// Ask participants of recently ended events for feedback.
    pub async fn send_feedback_requests(&self, now: DateTime<Utc>) -> Result<SweepReport, AppError> {
        let today = now.date_naive();
        let lookback = self.config.feedback_lookback_days;
        let events = self
            .event_repo
            .find_ended_between(today - Duration::days(lookback), today - Duration::days(1))
            .await?;

        let mut report = SweepReport::default();
        for event in events.iter().filter(|e| feedback_due(e, today, lookback)) {
            report.events += 1;
            let answered: HashSet<_> = self
                .feedback_repo
                .author_ids(event.id)
                .await?
                .into_iter()
                .collect();
            let message = format!("How was \"{}\"? Tell us in a quick feedback.", event.title);

            for user_id in self.event_repo.participant_ids(event.id).await? {
                if answered.contains(&user_id) {
                    continue;
                }
                let inserted = self
                    .notif_repo
                    .insert_deduplicated(&CreateNotification {
                        user_id,
                        kind: NotificationKind::FeedbackRequest,
                        message: message.clone(),
                        event_id: Some(event.id),
                    })
                    .await?;
                report.notifications_sent += usize::from(inserted);
            }
        }

        info!(
            events = report.events,
            sent = report.notifications_sent,
            "Feedback request sweep finished"
        );
        Ok(report)
    }
}

fn reminder_message(event: &Event) -> String {
    let when = match (event.start_date, event.start_time) {
        (Some(d), Some(t)) => format!("{} at {}", d.format("%Y-%m-%d"), t.format("%H:%M")),
        (Some(d), None) => d.format("%Y-%m-%d").to_string(),
        _ => "soon".to_string(),
    };
    match &event.city {
        Some(city) => format!("Reminder: \"{}\" starts {when} in {city}.", event.title),
        None => format!("Reminder: \"{}\" starts {when}.", event.title),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use glyms_entity::event::EventState;
    use uuid::Uuid;

    fn event(
        state: EventState,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        time: Option<NaiveTime>,
    ) -> Event {
        Event {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            title: "Escape game".into(),
            description: None,
            state,
            start_date: start,
            end_date: end,
            start_time: time,
            end_time: None,
            duration: None,
            city: None,
            activity_type: None,
            max_persons: None,
            cost_per_person: None,
            created_by_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_reminder_window() {
        let lookahead = Duration::hours(24);
        let now = at(10, 8);
        let time = NaiveTime::from_hms_opt(18, 0, 0);

        assert!(reminder_due(&event(EventState::Confirmed, Some(day(10)), None, time), now, lookahead));
        assert!(!reminder_due(&event(EventState::Confirmed, Some(day(11)), None, time), now, lookahead));
        assert!(reminder_due(&event(EventState::Planned, Some(day(11)), None, None), now, lookahead));
        assert!(!reminder_due(&event(EventState::Confirmed, Some(day(12)), None, None), now, lookahead));
        assert!(!reminder_due(&event(EventState::Confirmed, None, None, None), now, lookahead));
    }

    #[test]
    fn test_reminder_skips_started_events() {
        let now = at(10, 20);
        let time = NaiveTime::from_hms_opt(18, 0, 0);
        assert!(!reminder_due(
            &event(EventState::Confirmed, Some(day(10)), None, time),
            now,
            Duration::hours(24)
        ));
        assert!(!reminder_due(
            &event(EventState::Confirmed, Some(day(9)), None, None),
            now,
            Duration::hours(24)
        ));
    }

    #[test]
    fn test_feedback_window() {
        let today = day(20);
        assert!(feedback_due(&event(EventState::Planned, Some(day(19)), None, None), today, 7));
        assert!(feedback_due(&event(EventState::Confirmed, Some(day(10)), Some(day(13)), None), today, 7));
        assert!(!feedback_due(&event(EventState::Confirmed, Some(day(10)), Some(day(12)), None), today, 7));
        assert!(!feedback_due(&event(EventState::Confirmed, Some(day(20)), None, None), today, 7));
        assert!(!feedback_due(&event(EventState::Cancelled, Some(day(19)), None, None), today, 7));
    }

    #[test]
    fn test_reminder_message_mentions_city() {
        let mut e = event(EventState::Confirmed, Some(day(3)), None, NaiveTime::from_hms_opt(9, 30, 0));
        e.city = Some("Nantes".into());
        assert_eq!(
            reminder_message(&e),
            "Reminder: \"Escape game\" starts 2026-03-03 at 09:30 in Nantes."
        );
    }
}
