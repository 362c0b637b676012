//! Login, landing and not-found pages

use super::layout::{page, toasts};
use crate::guard::Route;
use crate::notify::Notification;
use maud::{Markup, html};

/// Login form
pub fn login(notifications: &[Notification], username: &str, busy: bool) -> Markup {
    page(
        Route::Login.title(),
        html! {
            main style="display:flex;min-height:100vh;align-items:center;justify-content:center" {
                form class="card" method="post" action=(Route::Login.path()) style="width:360px" {
                    h2 { "Admin Login" }
                    p class="muted" { "Sign in to manage your business." }
                    label for="username" { "Username" }
                    input id="username" name="username" type="text" value=(username) autocomplete="username";
                    label for="password" { "Password" }
                    input id="password" name="password" type="password" autocomplete="current-password";
                    p {
                        button type="submit" disabled[busy] {
                            @if busy { "Signing in..." } @else { "Sign in" }
                        }
                    }
                }
            }
            (toasts(notifications))
        },
    )
}

/// Public entry page
pub fn landing(signed_in: bool) -> Markup {
    page(
        Route::Landing.title(),
        html! {
            main style="max-width:640px;margin:4rem auto;text-align:center" {
                h1 { "Admin Panel" }
                p class="muted" {
                    "Manage the gallery, review booking inquiries and keep an eye on new activity."
                }
                @if signed_in {
                    a class="button" href=(Route::Dashboard.path()) { "Open dashboard" }
                } @else {
                    a class="button" href=(Route::Login.path()) { "Sign in" }
                }
            }
        },
    )
}

/// Unmatched path
pub fn not_found() -> Markup {
    page(
        Route::NotFound.title(),
        html! {
            main style="max-width:640px;margin:4rem auto;text-align:center" {
                h1 { "404" }
                p class="muted" { "Page not found" }
                a href=(Route::Landing.path()) { "Go back home" }
            }
        },
    )
}
