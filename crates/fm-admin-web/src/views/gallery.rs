//! Gallery view

use super::layout::{confirm_modal, deferred, shell, toasts};
use crate::guard::Route;
use crate::notify::Notification;
use crate::screens::GalleryScreen;
use maud::{Markup, html};

/// Where the page fetches its image grid from
pub const ITEMS_PATH: &str = "/gallery/items";

/// Upload form, image grid and the delete confirmation
///
/// While a load is pending the grid is a placeholder filled from
/// [`ITEMS_PATH`].
pub fn gallery(screen: &GalleryScreen, notifications: &[Notification]) -> Markup {
    let content = html! {
        div style="display:flex;justify-content:space-between;align-items:center" {
            h2 { "Gallery" }
            form method="post" action="/gallery/upload" enctype="multipart/form-data" {
                input type="file" name="image" accept="image/*" required;
                button type="submit" { "Upload" }
            }
        }
        @if screen.list().loading {
            (deferred(ITEMS_PATH))
        } @else {
            (items(screen))
        }
    };

    shell(Route::Gallery, None, notifications, content)
}

/// Image grid on its own, as served to a pending page
pub fn gallery_items(screen: &GalleryScreen, notifications: &[Notification]) -> Markup {
    html! {
        (toasts(notifications))
        (items(screen))
    }
}

fn items(screen: &GalleryScreen) -> Markup {
    let list = screen.list();
    html! {
        @if list.items.is_empty() {
            p class="muted" { "No images found. Upload your first image!" }
        } @else {
            div class="grid" {
                @for item in &list.items {
                    div class="card" {
                        img src=(item.url) alt=(item.title()) loading="lazy";
                        p { strong { (item.title()) } }
                        p class="muted" { (item.created_at.format("%b %e, %Y").to_string()) }
                        form method="post" action={ "/gallery/" (urlencoding::encode(&item.id)) "/delete" } {
                            button type="submit" class="danger" { "Delete" }
                        }
                    }
                }
            }
        }
        @if screen.pending_item().is_some() {
            (confirm_modal(
                "Delete Image?",
                "This action cannot be undone. This image will be permanently deleted.",
                "/gallery/delete/confirm",
                "/gallery/delete/cancel",
            ))
        }
    }
}
