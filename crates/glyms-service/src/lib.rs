//! # glyms-service
//!
//! Business logic service layer for Glyms. Each service orchestrates
//! repositories and auth primitives to implement one application use case
//! family.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod account;
pub mod company;
pub mod context;
pub mod event;
pub mod feedback;
pub mod gamification;
pub mod notification;
pub mod places;
pub mod preference;
pub mod tag;
pub mod tally;
pub mod team;
pub mod user;

pub use account::{AuthService, LoggingMailGateway, MailGateway, MailMessage, Session};
pub use company::CompanyService;
pub use context::RequestContext;
pub use event::{EventService, LifecycleService};
pub use feedback::FeedbackService;
pub use gamification::{GamificationService, Reward};
pub use notification::{NotificationService, SweepReport, SweepService};
pub use places::{BlacklistService, GooglePlacesClient, PlacesService};
pub use preference::PreferenceService;
pub use tag::TagService;
pub use team::TeamService;
pub use user::{AdminUserService, UserService};
