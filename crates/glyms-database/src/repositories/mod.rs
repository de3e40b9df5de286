//! Repository implementations for all Glyms aggregates.

pub mod blacklist;
pub mod company;
pub mod event;
pub mod feedback;
pub mod gamification;
pub mod invitation;
pub mod notification;
pub mod password_reset;
pub mod preference;
pub mod tag;
pub mod team;
pub mod user;

pub use blacklist::BlacklistRepository;
pub use company::CompanyRepository;
pub use event::{EventRepository, JoinOutcome};
pub use feedback::{FeedbackRepository, UpsertedFeedback};
pub use gamification::{BadgeRepository, PointsGrant, PointsRepository};
pub use invitation::InvitationRepository;
pub use notification::NotificationRepository;
pub use password_reset::PasswordResetRepository;
pub use preference::{PreferenceRepository, UpsertedPreference};
pub use tag::TagRepository;
pub use team::TeamRepository;
pub use user::UserRepository;

/// Whether `err` is a unique violation of the named constraint or index.
pub(crate) fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation() && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}
