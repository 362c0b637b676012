//! Page handlers rendering each screen from its controller

use crate::guard::Route;
use crate::notify::Notification;
use crate::screens::{BookingsScreen, DashboardScreen, Flow, LoginOutcome, SettingsForm};
use crate::state::AppState;
use crate::views;
use axum::{
    extract::{Multipart, Path, State, multipart::MultipartError},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use fm_admin_client::ImageUpload;
use maud::Markup;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Multipart field carrying the picked file
const IMAGE_FIELD: &str = "image";

/// Submitted login form
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    /// User name as typed
    #[serde(default)]
    pub username: String,
    /// Password as typed
    #[serde(default)]
    pub password: String,
}

fn respond(flow: Flow, render: impl FnOnce() -> Markup) -> Response {
    match flow {
        Flow::Render => render().into_response(),
        Flow::Redirect(route) => Redirect::to(route.path()).into_response(),
    }
}

/// Landing page
pub async fn landing(State(state): State<Arc<AppState>>) -> Markup {
    views::landing(state.session.is_authenticated())
}

/// Login form; an existing session goes straight to the dashboard
pub async fn login_page(State(state): State<Arc<AppState>>) -> Response {
    if state.session.is_authenticated() {
        return Redirect::to(Route::Dashboard.path()).into_response();
    }
    views::login(&state.notifications.drain(), "", state.login.is_busy()).into_response()
}

/// Login submission
pub async fn login_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Response {
    match state.login.submit(&form.username, &form.password).await {
        LoginOutcome::Navigate(route) => Redirect::to(route.path()).into_response(),
        LoginOutcome::Stay => views::login(
            &state.notifications.drain(),
            &form.username,
            state.login.is_busy(),
        )
        .into_response(),
    }
}

/// Sign out and return to login
pub async fn logout(State(state): State<Arc<AppState>>) -> Redirect {
    state.login.sign_out();
    Redirect::to(Route::Login.path())
}

/// Dashboard shell; the summary loads through [`dashboard_summary`]
pub async fn dashboard(State(state): State<Arc<AppState>>) -> Markup {
    let mut screen = state.dashboard.lock().await;
    screen.begin_load();
    views::dashboard(
        screen.summary(),
        screen.is_loading(),
        &state.notifications.drain(),
    )
}

/// Fresh dashboard summary
///
/// The screen lock is only taken once the fetches have finished.
pub async fn dashboard_summary(State(state): State<Arc<AppState>>) -> Response {
    let result = DashboardScreen::fetch(&state.api_client).await;

    let mut screen = state.dashboard.lock().await;
    let flow = screen.finish_load(result);
    respond(flow, || {
        views::dashboard_summary(screen.summary(), &state.notifications.drain())
    })
}

/// Gallery shell; the images load through [`gallery_items`]
pub async fn gallery(State(state): State<Arc<AppState>>) -> Markup {
    let mut screen = state.gallery.lock().await;
    screen.begin_load();
    views::gallery(&screen, &state.notifications.drain())
}

/// Fresh image grid
///
/// The screen lock is only taken once the fetch has finished.
pub async fn gallery_items(State(state): State<Arc<AppState>>) -> Response {
    let result = state.api_client.list_gallery().await;

    let mut screen = state.gallery.lock().await;
    let flow = screen.finish_load(result);
    respond(flow, || {
        views::gallery_items(&screen, &state.notifications.drain())
    })
}

/// Single-image upload
pub async fn gallery_upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Response {
    let upload = match read_image(&mut multipart).await {
        Ok(upload) => upload,
        Err(e) => {
            warn!("Unreadable upload form: {}", e);
            state
                .notifications
                .error("Upload failed", Some(e.body_text()));
            let screen = state.gallery.lock().await;
            let page = views::gallery(&screen, &state.notifications.drain());
            return (e.status(), page).into_response();
        }
    };

    let mut screen = state.gallery.lock().await;
    let flow = match upload {
        Some(upload) => screen.upload(upload).await,
        None => Flow::Render,
    };
    respond(flow, || views::gallery(&screen, &state.notifications.drain()))
}

async fn read_image(multipart: &mut Multipart) -> Result<Option<ImageUpload>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            debug!("Skipping form field {:?}", field.name());
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;

        return Ok(Some(ImageUpload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        }));
    }

    Ok(None)
}

/// Open the delete confirmation for one image
pub async fn gallery_request_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Markup {
    let mut screen = state.gallery.lock().await;
    screen.request_delete(id);
    views::gallery(&screen, &state.notifications.drain())
}

/// Delete the image awaiting confirmation
pub async fn gallery_confirm_delete(State(state): State<Arc<AppState>>) -> Response {
    let mut screen = state.gallery.lock().await;
    let flow = screen.confirm_delete().await;
    respond(flow, || views::gallery(&screen, &state.notifications.drain()))
}

/// Close the delete confirmation
pub async fn gallery_cancel_delete(State(state): State<Arc<AppState>>) -> Markup {
    let mut screen = state.gallery.lock().await;
    screen.cancel_delete();
    views::gallery(&screen, &state.notifications.drain())
}

/// Bookings shell; the inquiries load through [`bookings_items`]
pub async fn bookings(State(state): State<Arc<AppState>>) -> Markup {
    let mut screen = state.bookings.lock().await;
    screen.begin_load();
    views::bookings(&screen, &state.notifications.drain())
}

/// Fresh inquiry list
pub async fn bookings_items(State(state): State<Arc<AppState>>) -> Response {
    reload_bookings(&state, views::bookings_items).await
}

/// Explicit refresh, answered with the whole page
pub async fn bookings_refresh(State(state): State<Arc<AppState>>) -> Response {
    state.bookings.lock().await.begin_load();
    reload_bookings(&state, views::bookings).await
}

/// Fetch inquiries, render with `render`, then mark the new ones seen
///
/// The screen lock is held neither during the fetch nor while marking.
async fn reload_bookings(
    state: &AppState,
    render: fn(&BookingsScreen, &[Notification]) -> Markup,
) -> Response {
    let result = state.api_client.list_bookings().await;
    let fetched = result.is_ok();

    let (response, new_ids) = {
        let mut screen = state.bookings.lock().await;
        let flow = screen.finish_load(result);
        let new_ids = if fetched { screen.new_ids() } else { Vec::new() };
        let response = respond(flow, || render(&screen, &state.notifications.drain()));
        (response, new_ids)
    };

    BookingsScreen::mark_seen(&state.api_client, &new_ids).await;
    response
}

/// Open the delete confirmation for one inquiry
pub async fn bookings_request_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Markup {
    let mut screen = state.bookings.lock().await;
    screen.request_delete(id);
    views::bookings(&screen, &state.notifications.drain())
}

/// Delete the inquiry awaiting confirmation
pub async fn bookings_confirm_delete(State(state): State<Arc<AppState>>) -> Response {
    let mut screen = state.bookings.lock().await;
    let flow = screen.confirm_delete().await;
    respond(flow, || views::bookings(&screen, &state.notifications.drain()))
}

/// Close the delete confirmation
pub async fn bookings_cancel_delete(State(state): State<Arc<AppState>>) -> Markup {
    let mut screen = state.bookings.lock().await;
    screen.cancel_delete();
    views::bookings(&screen, &state.notifications.drain())
}

/// Preferences form
pub async fn settings(State(state): State<Arc<AppState>>) -> Markup {
    let screen = state.settings.lock().await;
    views::settings(screen.form(), &state.notifications.drain())
}

/// Save preferences locally
pub async fn settings_save(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SettingsForm>,
) -> Markup {
    let mut screen = state.settings.lock().await;
    screen.save(form);
    views::settings(screen.form(), &state.notifications.drain())
}

/// Fallback for unmatched paths
pub async fn not_found() -> (StatusCode, Markup) {
    (StatusCode::NOT_FOUND, views::not_found())
}
