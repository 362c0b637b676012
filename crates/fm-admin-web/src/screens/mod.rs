//! Headless screen controllers
//!
//! Each controller owns the local view state of one screen and reaches the
//! network only through [`ApiClient`]. Errors never escape a controller; they
//! become notifications, or a redirect to login when the server rejects the
//! credential and [`UnauthorizedPolicy::SignOut`] is in effect.

pub mod bookings;
pub mod dashboard;
pub mod gallery;
pub mod login;
pub mod settings;

pub use bookings::BookingsScreen;
pub use dashboard::{ActivityEntry, AssetProgress, DashboardScreen, DashboardSummary};
pub use gallery::GalleryScreen;
pub use login::{AuthPhase, LoginOutcome, LoginScreen};
pub use settings::{SettingsForm, SettingsScreen};

use crate::guard::Route;
use crate::notify::Notifications;
use fm_admin_client::{ApiClient, ClientError};
use fm_admin_core::RecordId;
use tracing::{info, warn};

/// What the handler should do once a controller operation finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Render the current screen from controller state
    Render,
    /// Navigate elsewhere
    Redirect(Route),
}

/// Reaction to a 401 answer on a protected screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthorizedPolicy {
    /// Clear the session and return to login
    SignOut,
    /// Treat it like any other failed request
    Notify,
}

impl UnauthorizedPolicy {
    /// Policy selected by the `session.logout_on_unauthorized` setting
    #[must_use]
    pub const fn from_setting(logout_on_unauthorized: bool) -> Self {
        if logout_on_unauthorized {
            Self::SignOut
        } else {
            Self::Notify
        }
    }
}

/// Collaborators shared by every protected screen
#[derive(Debug, Clone)]
pub struct ScreenContext {
    /// Gateway to the remote API
    pub client: ApiClient,
    /// Toast queue
    pub notifications: Notifications,
    /// 401 handling
    pub policy: UnauthorizedPolicy,
}

impl ScreenContext {
    /// Bundle the collaborators
    #[must_use]
    pub const fn new(
        client: ApiClient,
        notifications: Notifications,
        policy: UnauthorizedPolicy,
    ) -> Self {
        Self {
            client,
            notifications,
            policy,
        }
    }

    /// Turn a failed request into a notification or a sign-out
    ///
    /// `description` is used when the server supplied no message of its own,
    /// or always when `prefer_server_message` is false.
    pub(crate) fn fail(
        &self,
        error: &ClientError,
        title: &str,
        description: Option<&str>,
        prefer_server_message: bool,
    ) -> Flow {
        if error.is_unauthorized() && self.policy == UnauthorizedPolicy::SignOut {
            info!("Credential rejected by the server, signing out");
            if let Err(e) = self.client.session().logout() {
                warn!("Failed to clear stored credential: {}", e);
            }
            return Flow::Redirect(Route::Login);
        }

        warn!("{}: {}", title, error);
        let detail = error
            .server_message()
            .filter(|_| prefer_server_message)
            .or(description)
            .map(str::to_string);
        self.notifications.error(title, detail);
        Flow::Render
    }
}

/// Local view state of a resource list
#[derive(Debug, Clone)]
pub struct ListState<T> {
    /// Records as last fetched, minus local removals
    pub items: Vec<T>,
    /// A fetch is in progress
    pub loading: bool,
    /// Identifier awaiting delete confirmation
    pub pending_delete: Option<RecordId>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            pending_delete: None,
        }
    }
}

impl<T> ListState<T> {
    /// Remove every record matching `is_target`; returns how many went away
    pub fn remove_where(&mut self, is_target: impl Fn(&T) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !is_target(item));
        before - self.items.len()
    }

    /// First record matching `predicate`
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<&T> {
        self.items.iter().find(|item| predicate(item))
    }
}
