//! Application state management

use crate::notify::Notifications;
use crate::screens::{
    BookingsScreen, DashboardScreen, GalleryScreen, LoginScreen, ScreenContext, SettingsScreen,
    UnauthorizedPolicy,
};
use fm_admin_client::{ApiClient, ClientResult, Session};
use fm_admin_core::Config;
use tokio::sync::Mutex;

/// Application state holding configuration, the session and every screen
///
/// The console serves a single operator, so each screen controller exists
/// once and keeps its view state between requests.
#[derive(Debug)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// Process-wide session
    pub session: Session,
    /// Gateway to the remote API
    pub api_client: ApiClient,
    /// Pending toasts
    pub notifications: Notifications,
    /// Login controller
    pub login: LoginScreen,
    /// Dashboard controller
    pub dashboard: Mutex<DashboardScreen>,
    /// Gallery controller
    pub gallery: Mutex<GalleryScreen>,
    /// Bookings controller
    pub bookings: Mutex<BookingsScreen>,
    /// Settings controller
    pub settings: Mutex<SettingsScreen>,
}

impl AppState {
    /// Create new application state around an already restored session
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: Config, session: Session) -> ClientResult<Self> {
        let api_client = ApiClient::from_config(&config.api, session.clone())?;
        let notifications = Notifications::new();
        let ctx = ScreenContext::new(
            api_client.clone(),
            notifications.clone(),
            UnauthorizedPolicy::from_setting(config.session.logout_on_unauthorized),
        );

        Ok(Self {
            login: LoginScreen::new(api_client.clone(), notifications.clone()),
            dashboard: Mutex::new(DashboardScreen::new(ctx.clone())),
            gallery: Mutex::new(GalleryScreen::new(ctx.clone())),
            bookings: Mutex::new(BookingsScreen::new(ctx)),
            settings: Mutex::new(SettingsScreen::new(notifications.clone())),
            config,
            session,
            api_client,
            notifications,
        })
    }
}
