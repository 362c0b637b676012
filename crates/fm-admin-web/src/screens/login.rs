//! Login screen controller

use crate::guard::Route;
use crate::notify::Notifications;
use fm_admin_client::{ApiClient, ClientError, Token};
use fm_admin_core::types::LoginRequest;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

/// Authentication progress of the login screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    /// No credential held
    Anonymous,
    /// A login request is in flight
    Authenticating,
    /// A token was obtained and stored
    Authenticated,
}

/// Where the operator ends up after a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Leave the login screen
    Navigate(Route),
    /// Stay on the login screen
    Stay,
}

/// Resets the phase if a submission is abandoned mid-flight
struct InFlight<'a> {
    phase: &'a Mutex<AuthPhase>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut phase = self.phase.lock();
        if *phase == AuthPhase::Authenticating {
            *phase = AuthPhase::Anonymous;
        }
    }
}

/// Drives `anonymous → authenticating → authenticated | anonymous`
#[derive(Debug)]
pub struct LoginScreen {
    client: ApiClient,
    notifications: Notifications,
    phase: Mutex<AuthPhase>,
}

impl LoginScreen {
    /// Controller starting in the phase implied by the session
    #[must_use]
    pub fn new(client: ApiClient, notifications: Notifications) -> Self {
        let phase = if client.session().is_authenticated() {
            AuthPhase::Authenticated
        } else {
            AuthPhase::Anonymous
        };

        Self {
            client,
            notifications,
            phase: Mutex::new(phase),
        }
    }

    /// Current phase
    ///
    /// Outside a submission the phase follows the session, so a sign-out
    /// triggered elsewhere shows up here as well.
    #[must_use]
    pub fn phase(&self) -> AuthPhase {
        match *self.phase.lock() {
            AuthPhase::Authenticating => AuthPhase::Authenticating,
            _ if self.client.session().is_authenticated() => AuthPhase::Authenticated,
            _ => AuthPhase::Anonymous,
        }
    }

    /// Whether the submit control should be disabled
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.phase() == AuthPhase::Authenticating
    }

    /// Submit credentials
    ///
    /// Empty fields are rejected without a request. A submission arriving
    /// while another is in flight is ignored.
    pub async fn submit(&self, username: &str, password: &str) -> LoginOutcome {
        if username.trim().is_empty() || password.is_empty() {
            self.notifications.error(
                "Missing fields",
                Some("Please enter both username and password.".to_string()),
            );
            return LoginOutcome::Stay;
        }

        {
            let mut phase = self.phase.lock();
            if *phase == AuthPhase::Authenticating {
                debug!("Login already in flight, ignoring submission");
                return LoginOutcome::Stay;
            }
            *phase = AuthPhase::Authenticating;
        }
        let _in_flight = InFlight { phase: &self.phase };

        let request = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };

        let result = self.client.login(&request).await.and_then(|response| {
            self.client.session().login(Token::new(response.token))
        });

        match result {
            Ok(()) => {
                *self.phase.lock() = AuthPhase::Authenticated;
                info!("Logged in as {}", request.username);
                self.notifications.success(
                    "Login successful",
                    Some("Redirecting to dashboard...".to_string()),
                );
                LoginOutcome::Navigate(Route::Dashboard)
            }
            Err(e) => {
                *self.phase.lock() = AuthPhase::Anonymous;
                warn!("Login failed: {}", e);
                self.notifications
                    .error("Login failed", Some(failure_message(&e)));
                LoginOutcome::Stay
            }
        }
    }

    /// Forget the credential and return to the anonymous phase
    pub fn sign_out(&self) {
        if let Err(e) = self.client.session().logout() {
            warn!("Failed to clear stored credential: {}", e);
        }
        *self.phase.lock() = AuthPhase::Anonymous;
    }
}

fn failure_message(error: &ClientError) -> String {
    error
        .server_message()
        .unwrap_or("Invalid credentials")
        .to_string()
}
