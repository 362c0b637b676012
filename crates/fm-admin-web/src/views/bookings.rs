//! Bookings view

use super::layout::{confirm_modal, deferred, shell, toasts};
use crate::guard::Route;
use crate::notify::Notification;
use crate::screens::BookingsScreen;
use fm_admin_core::Booking;
use maud::{Markup, html};

const EMPTY: &str = "—";

/// Where the page fetches its inquiry list from
pub const ITEMS_PATH: &str = "/bookings/items";

/// Inquiry cards with a refresh action and the delete confirmation
///
/// While a load is pending the list is a placeholder filled from
/// [`ITEMS_PATH`].
pub fn bookings(screen: &BookingsScreen, notifications: &[Notification]) -> Markup {
    let loading = screen.list().loading;
    let content = html! {
        div style="display:flex;justify-content:space-between;align-items:center" {
            h2 { "Bookings" }
            form method="post" action="/bookings/refresh" {
                button type="submit" { "Refresh Data" }
            }
        }
        @if loading {
            (deferred(ITEMS_PATH))
        } @else {
            (items(screen))
        }
    };

    let unseen = (!loading).then(|| screen.new_count());
    shell(Route::Bookings, unseen, notifications, content)
}

/// Inquiry list on its own, as served to a pending page
pub fn bookings_items(screen: &BookingsScreen, notifications: &[Notification]) -> Markup {
    html! {
        (toasts(notifications))
        (items(screen))
    }
}

fn items(screen: &BookingsScreen) -> Markup {
    let list = screen.list();
    let new_count = screen.new_count();
    html! {
        p class="muted" {
            "You have " (list.items.len()) " total inquiries"
            @if new_count > 0 {
                " • " (new_count) " new"
            }
        }
        @if list.items.is_empty() {
            div class="card" {
                p { "No inquiries yet" }
                p class="muted" { "New inquiries will appear here." }
            }
        } @else {
            div class="grid" {
                @for booking in &list.items {
                    (card(booking))
                }
            }
        }
        @if let Some(booking) = screen.pending_item() {
            (confirm_modal(
                "Delete booking?",
                &format!("This will permanently delete the inquiry from {}.", booking.name),
                "/bookings/delete/confirm",
                "/bookings/delete/cancel",
            ))
        }
    }
}

fn card(booking: &Booking) -> Markup {
    html! {
        div class="card" {
            div style="display:flex;justify-content:space-between" {
                strong { (booking.name) }
                @if booking.is_new {
                    span class="badge" { "New" }
                }
            }
            @if let Some(phone) = &booking.phone {
                p { a href={ "tel:" (phone) } { (phone) } }
            }
            p class="muted" {
                (booking.event_type.as_deref().unwrap_or("Event"))
                @if let Some(guests) = booking.guests {
                    " · " (guests) " Guests"
                }
            }
            p { "Place: " (booking.place.as_deref().unwrap_or(EMPTY)) }
            p { "Message: " (booking.message.as_deref().unwrap_or(EMPTY)) }
            @if let Some(created_at) = booking.created_at {
                p class="muted" { (created_at.format("%b %e, %Y %H:%M").to_string()) }
            }
            form method="post" action={ "/bookings/" (urlencoding::encode(&booking.id)) "/delete" } {
                button type="submit" class="danger" { "Delete" }
            }
        }
    }
}
