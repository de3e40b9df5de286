//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use glyms_auth::{JwtDecoder, JwtEncoder, PasswordHasher, PasswordValidator, SharedSecret};
use glyms_core::config::AppConfig;
use glyms_core::error::AppError;
use glyms_database::DatabasePool;
use glyms_database::repositories::{
    BadgeRepository, BlacklistRepository, CompanyRepository, EventRepository, FeedbackRepository,
    InvitationRepository, NotificationRepository, PasswordResetRepository, PointsRepository,
    PreferenceRepository, TagRepository, TeamRepository, UserRepository,
};
use glyms_service::{
    AdminUserService, AuthService, BlacklistService, CompanyService, EventService,
    FeedbackService, GamificationService, GooglePlacesClient, LifecycleService, MailGateway,
    NotificationService, PlacesService, PreferenceService, SweepService, TagService, TeamService,
    UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    pub db: DatabasePool,

    // ── Auth ─────────────────────────────────────────────────
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Bearer secret of the cron endpoints
    pub cron_secret: Arc<SharedSecret>,

    // ── Services ─────────────────────────────────────────────
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub admin_user_service: Arc<AdminUserService>,
    pub company_service: Arc<CompanyService>,
    pub team_service: Arc<TeamService>,
    pub tag_service: Arc<TagService>,
    pub event_service: Arc<EventService>,
    pub lifecycle_service: Arc<LifecycleService>,
    pub preference_service: Arc<PreferenceService>,
    pub feedback_service: Arc<FeedbackService>,
    pub notification_service: Arc<NotificationService>,
    pub sweep_service: Arc<SweepService>,
    pub gamification_service: Arc<GamificationService>,
    pub places_service: Arc<PlacesService>,
    pub blacklist_service: Arc<BlacklistService>,
}

impl AppState {
    /// Wire repositories, auth primitives, and services over one pool.
    pub fn build(
        config: AppConfig,
        db: DatabasePool,
        mail: Arc<dyn MailGateway>,
    ) -> Result<Self, AppError> {
        let pool = db.pool().clone();

        // ── Repositories ─────────────────────────────────────
        let company_repo = Arc::new(CompanyRepository::new(pool.clone()));
        let user_repo = Arc::new(UserRepository::new(pool.clone()));
        let team_repo = Arc::new(TeamRepository::new(pool.clone()));
        let invitation_repo = Arc::new(InvitationRepository::new(pool.clone()));
        let reset_repo = Arc::new(PasswordResetRepository::new(pool.clone()));
        let tag_repo = Arc::new(TagRepository::new(pool.clone()));
        let event_repo = Arc::new(EventRepository::new(pool.clone()));
        let pref_repo = Arc::new(PreferenceRepository::new(pool.clone()));
        let feedback_repo = Arc::new(FeedbackRepository::new(pool.clone()));
        let notif_repo = Arc::new(NotificationRepository::new(pool.clone()));
        let badge_repo = Arc::new(BadgeRepository::new(pool.clone()));
        let points_repo = Arc::new(PointsRepository::new(pool.clone()));
        let blacklist_repo = Arc::new(BlacklistRepository::new(pool));

        // ── Auth ─────────────────────────────────────────────
        let hasher = Arc::new(PasswordHasher::new());
        let validator = Arc::new(PasswordValidator::new(&config.auth));
        let encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let cron_secret = Arc::new(SharedSecret::new(config.cron.secret.clone()));

        // ── Services ─────────────────────────────────────────
        let notification_service = Arc::new(NotificationService::new(Arc::clone(&notif_repo)));
        let gamification_service = Arc::new(GamificationService::new(
            points_repo,
            badge_repo,
            Arc::clone(&user_repo),
            config.gamification.clone(),
        ));
        let auth_service = Arc::new(AuthService::new(
            company_repo.clone(),
            Arc::clone(&user_repo),
            invitation_repo,
            reset_repo,
            Arc::clone(&hasher),
            Arc::clone(&validator),
            encoder,
            mail,
            config.auth.clone(),
        ));
        let user_service = Arc::new(UserService::new(
            Arc::clone(&user_repo),
            hasher,
            validator,
        ));
        let admin_user_service = Arc::new(AdminUserService::new(
            Arc::clone(&user_repo),
            Arc::clone(&team_repo),
        ));
        let company_service = Arc::new(CompanyService::new(company_repo));
        let team_service = Arc::new(TeamService::new(team_repo, Arc::clone(&user_repo)));
        let tag_service = Arc::new(TagService::new(Arc::clone(&tag_repo)));
        let event_service = Arc::new(EventService::new(
            Arc::clone(&event_repo),
            Arc::clone(&tag_repo),
            user_repo,
            Arc::clone(&notification_service),
            Arc::clone(&gamification_service),
        ));
        let lifecycle_service = Arc::new(LifecycleService::new(
            Arc::clone(&event_repo),
            Arc::clone(&pref_repo),
            Arc::clone(&tag_repo),
            Arc::clone(&notification_service),
        ));
        let preference_service = Arc::new(PreferenceService::new(
            pref_repo,
            Arc::clone(&event_repo),
            tag_repo,
            Arc::clone(&gamification_service),
        ));
        let feedback_service = Arc::new(FeedbackService::new(
            Arc::clone(&feedback_repo),
            Arc::clone(&event_repo),
            Arc::clone(&gamification_service),
        ));
        let sweep_service = Arc::new(SweepService::new(
            Arc::clone(&event_repo),
            feedback_repo,
            notif_repo,
            config.cron.clone(),
        ));
        let places_client = Arc::new(GooglePlacesClient::new(&config.google)?);
        let places_service = Arc::new(PlacesService::new(
            places_client,
            Arc::clone(&blacklist_repo),
            Arc::clone(&event_repo),
            &config.google,
        ));
        let blacklist_service = Arc::new(BlacklistService::new(blacklist_repo, event_repo));

        Ok(Self {
            config: Arc::new(config),
            db,
            jwt_decoder,
            cron_secret,
            auth_service,
            user_service,
            admin_user_service,
            company_service,
            team_service,
            tag_service,
            event_service,
            lifecycle_service,
            preference_service,
            feedback_service,
            notification_service,
            sweep_service,
            gamification_service,
            places_service,
            blacklist_service,
        })
    }
}
