//! Dashboard view

use super::layout::{deferred, shell, toasts};
use crate::guard::Route;
use crate::notify::Notification;
use crate::screens::{AssetProgress, DashboardSummary};
use maud::{Markup, html};

/// Where the page fetches its summary from
pub const SUMMARY_PATH: &str = "/dashboard/summary";

/// Counters, capacity gauges and the latest uploads
///
/// While a load is pending the body is a placeholder filled from
/// [`SUMMARY_PATH`].
pub fn dashboard(
    summary: Option<&DashboardSummary>,
    loading_now: bool,
    notifications: &[Notification],
) -> Markup {
    let unseen = summary
        .filter(|_| !loading_now)
        .map(|summary| summary.unseen_bookings);
    let content = html! {
        h2 { "Dashboard" }
        @if loading_now {
            (deferred(SUMMARY_PATH))
        } @else {
            (body(summary))
        }
    };

    shell(Route::Dashboard, unseen, notifications, content)
}

/// Summary body on its own, as served to a pending page
pub fn dashboard_summary(
    summary: Option<&DashboardSummary>,
    notifications: &[Notification],
) -> Markup {
    html! {
        (toasts(notifications))
        (body(summary))
    }
}

fn body(summary: Option<&DashboardSummary>) -> Markup {
    html! {
        @if let Some(summary) = summary {
            div class="grid" {
                (stat("Gallery", summary.gallery))
                (stat("Menu", summary.menu))
                (stat("Inquiries", summary.contact))
                (stat("Reviews", summary.testimonials))
            }
            div class="grid" style="margin-top:1rem" {
                section class="card" {
                    h3 { "Latest Updates" }
                    @if summary.activity.is_empty() {
                        p class="muted" { "Waiting for new activity..." }
                    }
                    @for entry in &summary.activity {
                        div style="display:flex;gap:.75rem;align-items:center;margin:.5rem 0" {
                            img src=(entry.image_url) alt=(entry.subject) width="48" height="48" style="border-radius:.5rem;object-fit:cover";
                            div {
                                strong { (entry.title) }
                                div class="muted" {
                                    (entry.subject) " by " (entry.actor) " · "
                                    time datetime=(entry.at.to_rfc3339()) { (entry.at.format("%b %e, %Y").to_string()) }
                                }
                            }
                        }
                    }
                }
                section class="card" {
                    h3 { "Assets" }
                    @for gauge in summary.progress() {
                        (progress(&gauge))
                    }
                }
            }
        } @else {
            p class="muted" { "No data yet." }
            a class="button" href=(Route::Dashboard.path()) { "Retry" }
        }
    }
}

fn stat(label: &str, value: usize) -> Markup {
    html! {
        div class="card" {
            div class="muted" { (label) }
            div style="font-size:2rem;font-weight:700" { (value) }
        }
    }
}

fn progress(gauge: &AssetProgress) -> Markup {
    let percent = gauge.percent();
    html! {
        div style="margin:.75rem 0" {
            div style="display:flex;justify-content:space-between" {
                span { (gauge.label) }
                span class="muted" { (gauge.value) " / " (gauge.capacity) }
            }
            div class="progress" {
                span style={ "width:" (percent) "%" } {}
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use crate::screens::DashboardSummary;

    #[test]
    fn test_empty_feed_placeholder() {
        let summary = DashboardSummary::from_collections(&[], &[], &[], &[]);
        let html = dashboard(Some(&summary), false, &[]).into_string();

        assert!(html.contains("Waiting for new activity..."));
        assert!(html.contains("Gallery Space"));
        assert!(html.contains("width:0%"));
    }

    #[test]
    fn test_pending_load_defers_body() {
        let html = dashboard(None, true, &[]).into_string();
        assert!(html.contains(r#"data-load="/dashboard/summary""#));
        assert!(!html.contains("Retry"));
    }

    #[test]
    fn test_without_summary_offers_retry() {
        let html = dashboard(None, false, &[]).into_string();
        assert!(html.contains("Retry"));
    }
}
