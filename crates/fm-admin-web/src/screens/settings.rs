//! Local preferences form

use crate::notify::Notifications;
use serde::Deserialize;
use tracing::info;

/// Profile and notification preferences
///
/// Checkbox fields are absent from a submitted form when unticked, hence the
/// `false` default on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SettingsForm {
    /// Given name
    #[serde(default)]
    pub first_name: String,
    /// Family name
    #[serde(default)]
    pub last_name: String,
    /// Contact address
    #[serde(default)]
    pub email: String,
    /// Email notifications
    #[serde(default)]
    pub email_notifications: bool,
    /// Push notifications
    #[serde(default)]
    pub push_notifications: bool,
    /// Weekly digest
    #[serde(default)]
    pub weekly_digest: bool,
}

impl Default for SettingsForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            email_notifications: true,
            push_notifications: true,
            weekly_digest: false,
        }
    }
}

/// Holds preferences for the life of the process; nothing is sent anywhere
#[derive(Debug)]
pub struct SettingsScreen {
    notifications: Notifications,
    form: SettingsForm,
}

impl SettingsScreen {
    /// Screen showing the default preferences
    #[must_use]
    pub fn new(notifications: Notifications) -> Self {
        Self {
            notifications,
            form: SettingsForm::default(),
        }
    }

    /// Preferences as last saved
    #[must_use]
    pub const fn form(&self) -> &SettingsForm {
        &self.form
    }

    /// Keep `form` and confirm
    pub fn save(&mut self, form: SettingsForm) {
        info!("Preferences updated");
        self.form = form;
        self.notifications.success(
            "Settings saved",
            Some("Your preferences have been updated.".to_string()),
        );
    }
}
