//! Service flows against a real PostgreSQL.
//!
//! Run with `DATABASE_URL=postgres://... cargo test -p glyms-service -- --ignored`.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use glyms_core::config::{CronConfig, DatabaseConfig, GamificationConfig};
use glyms_core::error::ErrorKind;
use glyms_core::types::pagination::PageRequest;
use glyms_database::repositories::{
    BadgeRepository, CompanyRepository, EventRepository, FeedbackRepository,
    NotificationRepository, PointsRepository, PreferenceRepository, TagRepository, UserRepository,
};
use glyms_database::{DatabasePool, run_migrations};
use glyms_entity::event::EventState;
use glyms_entity::notification::{Notification, NotificationKind};
use glyms_entity::user::{CreateUser, User, UserRole};
use glyms_service::event::NewEvent;
use glyms_service::feedback::FeedbackInput;
use glyms_service::preference::PreferenceInput;
use glyms_service::{
    EventService, FeedbackService, GamificationService, LifecycleService, NotificationService,
    PreferenceService, RequestContext, SweepService,
};

struct Services {
    db: DatabasePool,
    users: Arc<UserRepository>,
    tags: Arc<TagRepository>,
    notifications: Arc<NotificationRepository>,
    events: EventService,
    lifecycle: LifecycleService,
    preferences: PreferenceService,
    feedback: FeedbackService,
    sweeps: SweepService,
}

async fn services() -> Services {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let db = DatabasePool::connect(&DatabaseConfig {
        url,
        max_connections: 5,
        min_connections: 0,
        connect_timeout_seconds: 5,
        idle_timeout_seconds: 60,
        run_migrations: true,
    })
    .await
    .expect("connect");
    run_migrations(db.pool()).await.expect("migrate");

    let pool = db.pool().clone();
    let users = Arc::new(UserRepository::new(pool.clone()));
    let tags = Arc::new(TagRepository::new(pool.clone()));
    let event_repo = Arc::new(EventRepository::new(pool.clone()));
    let pref_repo = Arc::new(PreferenceRepository::new(pool.clone()));
    let feedback_repo = Arc::new(FeedbackRepository::new(pool.clone()));
    let notifications = Arc::new(NotificationRepository::new(pool.clone()));

    let notification_service = Arc::new(NotificationService::new(Arc::clone(&notifications)));
    let gamification = Arc::new(GamificationService::new(
        Arc::new(PointsRepository::new(pool.clone())),
        Arc::new(BadgeRepository::new(pool)),
        Arc::clone(&users),
        GamificationConfig::default(),
    ));

    Services {
        events: EventService::new(
            Arc::clone(&event_repo),
            Arc::clone(&tags),
            Arc::clone(&users),
            Arc::clone(&notification_service),
            Arc::clone(&gamification),
        ),
        lifecycle: LifecycleService::new(
            Arc::clone(&event_repo),
            Arc::clone(&pref_repo),
            Arc::clone(&tags),
            notification_service,
        ),
        preferences: PreferenceService::new(
            pref_repo,
            Arc::clone(&event_repo),
            Arc::clone(&tags),
            Arc::clone(&gamification),
        ),
        feedback: FeedbackService::new(
            Arc::clone(&feedback_repo),
            Arc::clone(&event_repo),
            gamification,
        ),
        sweeps: SweepService::new(
            event_repo,
            feedback_repo,
            Arc::clone(&notifications),
            CronConfig::default(),
        ),
        db,
        users,
        tags,
        notifications,
    }
}

/// A fresh company: its admin plus `colleagues` standard members.
async fn company(s: &Services, colleagues: usize) -> (User, Vec<User>) {
    let admin = CreateUser {
        email: format!("admin-{}@acme.test", Uuid::new_v4()),
        password_hash: "hash".into(),
        first_name: "Ada".into(),
        last_name: "Admin".into(),
        role: UserRole::Admin,
        company_id: Uuid::nil(),
    };
    let (company, admin) = CompanyRepository::new(s.db.pool().clone())
        .register("Acme", &admin)
        .await
        .unwrap();

    let mut members = Vec::with_capacity(colleagues);
    for i in 0..colleagues {
        let user = s
            .users
            .create(&CreateUser {
                email: format!("member{i}-{}@acme.test", Uuid::new_v4()),
                password_hash: "hash".into(),
                first_name: "Grace".into(),
                last_name: format!("Member{i}"),
                role: UserRole::Standard,
                company_id: company.id,
            })
            .await
            .unwrap();
        members.push(user);
    }
    (admin, members)
}

fn ctx(user: &User) -> RequestContext {
    RequestContext::from_user(user)
}

fn dated(start: NaiveDate, end: Option<NaiveDate>) -> NewEvent {
    NewEvent {
        title: "Team day".into(),
        start_date: Some(start),
        end_date: end,
        ..NewEvent::default()
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

async fn points(s: &Services, user: &User) -> i32 {
    s.users.find_by_id(user.id).await.unwrap().unwrap().points
}

async fn inbox(s: &Services, user: &User, kind: NotificationKind) -> Vec<Notification> {
    s.notifications
        .find_by_user(user.id, false, &PageRequest::new(1, 100))
        .await
        .unwrap()
        .items
        .into_iter()
        .filter(|n| n.notification_type == kind.as_str())
        .collect()
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn rejoining_an_event_earns_join_points_once() {
    let s = services().await;
    let (owner, members) = company(&s, 1).await;
    let member = &members[0];
    let event = s
        .events
        .create(&ctx(&owner), dated(today() + Duration::days(10), None))
        .await
        .unwrap()
        .event;

    for _ in 0..5 {
        s.events.join(&ctx(member), event.id).await.unwrap();
        s.events.leave(&ctx(member), event.id).await.unwrap();
    }

    assert_eq!(points(&s, member).await, 10);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn creator_cannot_leave_their_event() {
    let s = services().await;
    let (owner, _) = company(&s, 0).await;
    let event = s
        .events
        .create(&ctx(&owner), dated(today() + Duration::days(10), None))
        .await
        .unwrap()
        .event;

    let err = s.events.leave(&ctx(&owner), event.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let details = s.events.get(&ctx(&owner), event.id).await.unwrap();
    assert!(details.participants.iter().any(|p| p.id == owner.id));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn first_vote_and_first_feedback_earn_points_once() {
    let s = services().await;
    let (owner, members) = company(&s, 1).await;
    let member = &members[0];
    let tag = s.tags.list().await.unwrap().remove(0);
    let event = s
        .events
        .create(&ctx(&owner), dated(today() + Duration::days(10), None))
        .await
        .unwrap()
        .event;
    s.events.join(&ctx(member), event.id).await.unwrap();
    assert_eq!(points(&s, member).await, 10);

    for days in [12, 14] {
        s.preferences
            .upsert(
                &ctx(member),
                event.id,
                PreferenceInput {
                    tag_id: tag.id,
                    preferred_date: today() + Duration::days(days),
                    google_maps_tags: None,
                },
            )
            .await
            .unwrap();
    }
    assert_eq!(points(&s, member).await, 15);
    let votes = s.preferences.list(&ctx(&owner), event.id).await.unwrap();
    let mine: Vec<_> = votes.iter().filter(|v| v.user_id == member.id).collect();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].preferred_date, today() + Duration::days(14));

    for rating in [Some(3), Some(5)] {
        s.feedback
            .submit(
                &ctx(member),
                event.id,
                FeedbackInput {
                    participated: true,
                    rating,
                    message: None,
                },
            )
            .await
            .unwrap();
    }
    assert_eq!(points(&s, member).await, 30);
    let report = s.feedback.report(&ctx(&owner), event.id).await.unwrap();
    assert_eq!(report.feedbacks.len(), 1);
    assert_eq!(report.feedbacks[0].rating, Some(5));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn finalize_writes_the_winners_and_notifies_participants() {
    let s = services().await;
    let (owner, members) = company(&s, 2).await;
    let catalog = s.tags.list().await.unwrap();
    let (winner, loser) = (&catalog[0], &catalog[1]);
    let winning_day = today() + Duration::days(30);
    let event = s
        .events
        .create(&ctx(&owner), dated(today() + Duration::days(20), None))
        .await
        .unwrap()
        .event;

    let votes = [
        (&owner, winner, winning_day),
        (&members[0], winner, winning_day),
        (&members[1], loser, today() + Duration::days(25)),
    ];
    for (user, tag, day) in votes {
        if user.id != owner.id {
            s.events.join(&ctx(user), event.id).await.unwrap();
        }
        s.preferences
            .upsert(
                &ctx(user),
                event.id,
                PreferenceInput {
                    tag_id: tag.id,
                    preferred_date: day,
                    google_maps_tags: None,
                },
            )
            .await
            .unwrap();
    }

    let outcome = s.lifecycle.finalize(&ctx(&owner), event.id).await.unwrap();
    assert_eq!(outcome.event.state, EventState::Confirmed);
    assert_eq!(outcome.event.activity_type.as_deref(), Some(winner.name.as_str()));
    assert_eq!(outcome.event.start_date, Some(winning_day));

    for user in [&owner, &members[0], &members[1]] {
        assert_eq!(inbox(&s, user, NotificationKind::EventConfirmed).await.len(), 1);
    }

    s.lifecycle
        .transition(&ctx(&owner), event.id, EventState::Cancelled)
        .await
        .unwrap();
    let err = s.lifecycle.finalize(&ctx(&owner), event.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn reminder_sweep_notifies_each_participant_once() {
    let s = services().await;
    let (owner, members) = company(&s, 1).await;
    let event = s
        .events
        .create(&ctx(&owner), dated(today() + Duration::days(1), None))
        .await
        .unwrap()
        .event;
    s.events.join(&ctx(&members[0]), event.id).await.unwrap();
    s.lifecycle.finalize(&ctx(&owner), event.id).await.unwrap();

    s.sweeps.send_event_reminders(Utc::now()).await.unwrap();
    s.sweeps.send_event_reminders(Utc::now()).await.unwrap();

    for user in [&owner, &members[0]] {
        let reminders = inbox(&s, user, NotificationKind::EventReminder).await;
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].event_id, Some(event.id));
    }
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn feedback_sweep_skips_authors_and_never_resends() {
    let s = services().await;
    let (owner, members) = company(&s, 2).await;
    let (answered, silent) = (&members[0], &members[1]);
    let event = s
        .events
        .create(
            &ctx(&owner),
            dated(today() - Duration::days(3), Some(today() - Duration::days(2))),
        )
        .await
        .unwrap()
        .event;
    for user in [answered, silent] {
        s.events.join(&ctx(user), event.id).await.unwrap();
    }
    s.feedback
        .submit(
            &ctx(answered),
            event.id,
            FeedbackInput {
                participated: true,
                rating: Some(4),
                message: Some("Great".into()),
            },
        )
        .await
        .unwrap();

    s.sweeps.send_feedback_requests(Utc::now()).await.unwrap();

    assert!(inbox(&s, answered, NotificationKind::FeedbackRequest).await.is_empty());
    assert_eq!(inbox(&s, &owner, NotificationKind::FeedbackRequest).await.len(), 1);
    let requests = inbox(&s, silent, NotificationKind::FeedbackRequest).await;
    assert_eq!(requests.len(), 1);

    // A deleted request stays delivered.
    assert!(s.notifications.delete(requests[0].id, silent.id).await.unwrap());
    s.sweeps.send_feedback_requests(Utc::now()).await.unwrap();
    assert!(inbox(&s, silent, NotificationKind::FeedbackRequest).await.is_empty());
    assert_eq!(inbox(&s, &owner, NotificationKind::FeedbackRequest).await.len(), 1);
}
