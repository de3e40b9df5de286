//! Repository round-trips against a real PostgreSQL.
//!
//! Run with `DATABASE_URL=postgres://... cargo test -p glyms-database -- --ignored`.

use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use glyms_core::config::DatabaseConfig;
use glyms_core::error::ErrorKind;
use glyms_core::types::pagination::PageRequest;
use glyms_database::repositories::{
    CompanyRepository, EventRepository, FeedbackRepository, JoinOutcome, NotificationRepository,
    PointsRepository, PreferenceRepository, TagRepository,
};
use glyms_database::{DatabasePool, run_migrations};
use glyms_entity::event::{CreateEvent, EventState};
use glyms_entity::feedback::UpsertFeedback;
use glyms_entity::preference::UpsertPreference;
use glyms_entity::notification::{CreateNotification, NotificationKind};
use glyms_entity::user::{CreateUser, User, UserRole};

async fn pool() -> DatabasePool {
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
    db
}

async fn register(db: &DatabasePool) -> User {
    let admin = CreateUser {
        email: format!("admin-{}@acme.test", Uuid::new_v4()),
        password_hash: "hash".into(),
        first_name: "Ada".into(),
        last_name: "Admin".into(),
        role: UserRole::Admin,
        company_id: Uuid::nil(),
    };
    let (_, user) = CompanyRepository::new(db.pool().clone())
        .register("Acme", &admin)
        .await
        .expect("register");
    user
}

fn new_event(owner: &User, max_persons: Option<i32>) -> CreateEvent {
    CreateEvent {
        company_id: owner.company_id,
        created_by_id: owner.id,
        title: "Bowling night".into(),
        description: None,
        start_date: Some((Utc::now() + Duration::days(3)).date_naive()),
        end_date: None,
        start_time: None,
        end_time: None,
        duration: Some(120),
        city: Some("Lyon".into()),
        max_persons,
        cost_per_person: None,
    }
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn grant_unlocks_each_badge_once() {
    let db = pool().await;
    let user = register(&db).await;
    let points = PointsRepository::new(db.pool().clone());

    let first = points
        .grant(user.id, 60, "test", |b| format!("unlocked {}", b.name))
        .await
        .unwrap();
    assert_eq!(first.total, 60);
    let names: Vec<_> = first.unlocked.iter().map(|b| b.name.as_str()).collect();
    assert!(names.contains(&"Newcomer"));
    assert!(names.contains(&"Team Player"));

    let second = points
        .grant(user.id, 5, "test", |b| format!("unlocked {}", b.name))
        .await
        .unwrap();
    assert_eq!(second.total, 65);
    assert!(second.unlocked.is_empty());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn deduplicated_notifications_are_written_once() {
    let db = pool().await;
    let user = register(&db).await;
    let event = EventRepository::new(db.pool().clone())
        .create(&new_event(&user, None), &[], &[])
        .await
        .unwrap();
    let repo = NotificationRepository::new(db.pool().clone());
    let reminder = CreateNotification {
        user_id: user.id,
        kind: NotificationKind::EventReminder,
        message: "soon".into(),
        event_id: Some(event.id),
    };

    assert!(repo.insert_deduplicated(&reminder).await.unwrap());
    assert!(!repo.insert_deduplicated(&reminder).await.unwrap());
    assert_eq!(repo.count_unread(user.id).await.unwrap(), 1);

    let sent = repo
        .find_by_user(user.id, false, &PageRequest::new(1, 10))
        .await
        .unwrap()
        .items;
    assert!(repo.delete(sent[0].id, user.id).await.unwrap());
    assert!(!repo.insert_deduplicated(&reminder).await.unwrap());
    assert_eq!(repo.count_unread(user.id).await.unwrap(), 0);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn join_respects_capacity() {
    let db = pool().await;
    let owner = register(&db).await;
    let events = EventRepository::new(db.pool().clone());
    let event = events.create(&new_event(&owner, Some(1)), &[], &[]).await.unwrap();

    assert_eq!(
        events.add_participant(event.id, owner.id).await.unwrap(),
        JoinOutcome::AlreadyParticipant
    );

    let other = register(&db).await;
    assert_eq!(events.add_participant(event.id, other.id).await.unwrap(), JoinOutcome::Full);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn rejoin_is_not_a_first_join() {
    let db = pool().await;
    let owner = register(&db).await;
    let member = register(&db).await;
    let events = EventRepository::new(db.pool().clone());
    let event = events.create(&new_event(&owner, None), &[], &[]).await.unwrap();

    assert_eq!(
        events.add_participant(event.id, member.id).await.unwrap(),
        JoinOutcome::Joined { first_time: true }
    );
    assert!(events.remove_participant(event.id, member.id).await.unwrap());
    assert_eq!(
        events.add_participant(event.id, member.id).await.unwrap(),
        JoinOutcome::Joined { first_time: false }
    );
}

fn day(offset: i64) -> NaiveDate {
    (Utc::now() + Duration::days(offset)).date_naive()
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn confirm_writes_winners_and_moves_the_date_range() {
    let db = pool().await;
    let owner = register(&db).await;
    let events = EventRepository::new(db.pool().clone());

    let mut ranged = new_event(&owner, None);
    ranged.start_date = Some(day(-2));
    ranged.end_date = Some(day(-1));
    let event = events.create(&ranged, &[], &[]).await.unwrap();

    let confirmed = events
        .confirm(event.id, Some("Karaoke"), Some(day(20)))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(confirmed.state, EventState::Confirmed);
    assert_eq!(confirmed.activity_type.as_deref(), Some("Karaoke"));
    assert_eq!(confirmed.start_date, Some(day(20)));
    assert_eq!(confirmed.end_date, Some(day(21)));

    let mut end_only = new_event(&owner, None);
    end_only.start_date = None;
    end_only.end_date = Some(day(-1));
    let event = events.create(&end_only, &[], &[]).await.unwrap();
    let confirmed = events.confirm(event.id, None, Some(day(5))).await.unwrap().unwrap();
    assert_eq!(confirmed.start_date, Some(day(5)));
    assert_eq!(confirmed.end_date, Some(day(5)));
    assert_eq!(confirmed.activity_type, None);

    let untouched = events.create(&ranged, &[], &[]).await.unwrap();
    let confirmed = events.confirm(untouched.id, None, None).await.unwrap().unwrap();
    assert_eq!(confirmed.start_date, Some(day(-2)));
    assert_eq!(confirmed.end_date, Some(day(-1)));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn stale_transitions_do_not_overwrite_a_cancel() {
    let db = pool().await;
    let owner = register(&db).await;
    let events = EventRepository::new(db.pool().clone());
    let event = events.create(&new_event(&owner, None), &[], &[]).await.unwrap();

    let cancelled = events.set_state(event.id, EventState::Cancelled).await.unwrap();
    assert_eq!(cancelled.map(|e| e.state), Some(EventState::Cancelled));

    assert!(events.confirm(event.id, Some("Bowling"), Some(day(9))).await.unwrap().is_none());
    assert!(events.set_state(event.id, EventState::Planned).await.unwrap().is_none());
    let stored = events.find_by_id(event.id).await.unwrap().unwrap();
    assert_eq!(stored.state, EventState::Cancelled);
    assert_eq!(stored.activity_type, None);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn upserts_keep_one_row_and_flag_the_first_write() {
    let db = pool().await;
    let owner = register(&db).await;
    let event = EventRepository::new(db.pool().clone())
        .create(&new_event(&owner, None), &[], &[])
        .await
        .unwrap();
    let tags = TagRepository::new(db.pool().clone()).list().await.unwrap();

    let prefs = PreferenceRepository::new(db.pool().clone());
    let mut vote = UpsertPreference {
        user_id: owner.id,
        event_id: event.id,
        tag_id: tags[0].id,
        preferred_date: day(10),
        google_maps_tags: None,
    };
    assert!(prefs.upsert(&vote).await.unwrap().inserted);
    vote.tag_id = tags[1].id;
    let second = prefs.upsert(&vote).await.unwrap();
    assert!(!second.inserted);
    assert_eq!(second.preference.tag_id, tags[1].id);
    assert_eq!(prefs.list_for_event(event.id).await.unwrap().len(), 1);

    let feedback = FeedbackRepository::new(db.pool().clone());
    let mut answer = UpsertFeedback {
        user_id: owner.id,
        event_id: event.id,
        participated: true,
        rating: Some(2),
        message: None,
    };
    assert!(feedback.upsert(&answer).await.unwrap().inserted);
    answer.rating = Some(5);
    let second = feedback.upsert(&answer).await.unwrap();
    assert!(!second.inserted);
    assert_eq!(second.feedback.rating, Some(5));
    assert_eq!(feedback.list_for_event(event.id).await.unwrap().len(), 1);
    assert_eq!(feedback.author_ids(event.id).await.unwrap(), vec![owner.id]);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn grant_cannot_take_total_below_zero() {
    let db = pool().await;
    let user = register(&db).await;
    let points = PointsRepository::new(db.pool().clone());

    points.grant(user.id, 20, "test", |b| b.name.clone()).await.unwrap();
    let err = points
        .grant(user.id, -30, "penalty", |b| b.name.clone())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let after = points.grant(user.id, -20, "penalty", |b| b.name.clone()).await.unwrap();
    assert_eq!(after.total, 0);
    let history = points.history(user.id, &PageRequest::new(1, 10)).await.unwrap();
    assert_eq!(history.items.len(), 2);
}
