//! Route definitions for the admin console

use crate::{
    guard::{require_session, require_token},
    handlers::{api, pages},
    state::AppState,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use std::sync::Arc;

/// Largest accepted image upload
const UPLOAD_LIMIT: usize = 10 * 1024 * 1024;

/// Build the complete web application router
pub fn build_routes(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    let screens = Router::new()
        .route("/dashboard", get(pages::dashboard))
        .route("/dashboard/summary", get(pages::dashboard_summary))
        .route("/gallery", get(pages::gallery))
        .route("/gallery/items", get(pages::gallery_items))
        .route(
            "/gallery/upload",
            post(pages::gallery_upload).layer(DefaultBodyLimit::max(UPLOAD_LIMIT)),
        )
        .route("/gallery/:id/delete", post(pages::gallery_request_delete))
        .route("/gallery/delete/confirm", post(pages::gallery_confirm_delete))
        .route("/gallery/delete/cancel", post(pages::gallery_cancel_delete))
        .route("/bookings", get(pages::bookings))
        .route("/bookings/items", get(pages::bookings_items))
        .route("/bookings/refresh", post(pages::bookings_refresh))
        .route("/bookings/:id/delete", post(pages::bookings_request_delete))
        .route("/bookings/delete/confirm", post(pages::bookings_confirm_delete))
        .route("/bookings/delete/cancel", post(pages::bookings_cancel_delete))
        .route("/settings", get(pages::settings).post(pages::settings_save))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(state),
            require_session,
        ));

    // Live badge updates
    let sockets = Router::new()
        .route("/ws/unseen", get(api::unseen_socket))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(state),
            require_token,
        ));

    Router::new()
        // Public pages
        .route("/", get(pages::landing))
        .route("/login", get(pages::login_page).post(pages::login_submit))
        .route("/logout", post(pages::logout))
        // Health check
        .route("/health", get(api::health_check))
        .merge(screens)
        .merge(sockets)
        .fallback(pages::not_found)
}
