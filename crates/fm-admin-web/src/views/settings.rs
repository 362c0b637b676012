//! Settings view

use super::layout::shell;
use crate::guard::Route;
use crate::notify::Notification;
use crate::screens::SettingsForm;
use maud::{Markup, html};

/// Profile fields and notification toggles
pub fn settings(form: &SettingsForm, notifications: &[Notification]) -> Markup {
    let content = html! {
        h2 { "Settings" }
        form class="card" method="post" action=(Route::Settings.path()) style="max-width:520px" {
            h3 { "Profile" }
            label for="first_name" { "First Name" }
            input id="first_name" name="first_name" type="text" value=(form.first_name);
            label for="last_name" { "Last Name" }
            input id="last_name" name="last_name" type="text" value=(form.last_name);
            label for="email" { "Email" }
            input id="email" name="email" type="email" value=(form.email);

            h3 { "Notifications" }
            (toggle("email_notifications", "Email notifications", form.email_notifications))
            (toggle("push_notifications", "Push notifications", form.push_notifications))
            (toggle("weekly_digest", "Weekly digest", form.weekly_digest))

            p { button type="submit" { "Save changes" } }
        }
    };

    shell(Route::Settings, None, notifications, content)
}

fn toggle(name: &str, label: &str, checked: bool) -> Markup {
    html! {
        label {
            input type="checkbox" name=(name) value="true" checked[checked];
            " " (label)
        }
    }
}
