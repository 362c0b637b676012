//! Web server setup and configuration

use crate::{routes::build_routes, state::AppState};
use axum::Router;
use fm_admin_client::{ClientResult, Session};
use fm_admin_core::Config;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the complete web application with all routes and state
///
/// # Errors
///
/// Returns an error if the API client cannot be built from `config`.
pub fn build_app(config: Config, session: Session) -> ClientResult<Router> {
    let state = Arc::new(AppState::new(config, session)?);

    Ok(build_routes(&state)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
